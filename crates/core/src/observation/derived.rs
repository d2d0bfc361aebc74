//! Derived metric calculator: a small named-formula registry.
//!
//! Each configured metric names a calculator and the inputs it needs.
//! Inputs come from the already-aggregated numeric means and, when
//! requested, from block attributes. A metric with any missing input,
//! an unknown calculator or a degenerate formula is skipped silently;
//! there are no partial results.

use std::collections::BTreeMap;

use serde::Serialize;

use super::context::BlockInfo;
use super::numeric::FieldStats;
use super::stats::round2;
use super::template_config::DerivedMetricSpec;

/// Closed set of supported calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calculator {
    /// `bunches_per_vine * bunch_weight_g * vines_per_ha / 1_000_000`
    YieldTonnesPerHa,
    /// `inflorescences_per_shoot * flowers_per_inflorescence`
    FlowersPerShoot,
    /// `a / b` over exactly two inputs in declaration order.
    Divide,
    /// `x / 100` over exactly one input.
    DivideBy100,
    /// `a - b` over exactly two inputs in declaration order.
    Subtract,
}

impl Calculator {
    /// Resolve a configured identifier. Unknown names are `None` and
    /// the metric is skipped, never an error.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "yield_t_per_ha" => Some(Self::YieldTonnesPerHa),
            "flowers_per_shoot" => Some(Self::FlowersPerShoot),
            "divide" => Some(Self::Divide),
            "divide_by_100" => Some(Self::DivideBy100),
            "subtract" => Some(Self::Subtract),
            _ => None,
        }
    }

    /// Apply the formula to the gathered inputs. `None` when a named
    /// input is absent, the arity is wrong, or a divisor is zero.
    fn apply(self, inputs: &[(String, f64)]) -> Option<f64> {
        match self {
            Self::YieldTonnesPerHa => {
                let bunches = named(inputs, "bunches_per_vine")?;
                let weight = named(inputs, "bunch_weight_g")?;
                let vines = named(inputs, "vines_per_ha")?;
                Some(bunches * weight * vines / 1_000_000.0)
            }
            Self::FlowersPerShoot => {
                let inflorescences = named(inputs, "inflorescences_per_shoot")?;
                let flowers = named(inputs, "flowers_per_inflorescence")?;
                Some(inflorescences * flowers)
            }
            Self::Divide => match inputs {
                [(_, numerator), (_, denominator)] if *denominator != 0.0 => {
                    Some(numerator / denominator)
                }
                _ => None,
            },
            Self::DivideBy100 => match inputs {
                [(_, x)] => Some(x / 100.0),
                _ => None,
            },
            Self::Subtract => match inputs {
                [(_, a), (_, b)] => Some(a - b),
                _ => None,
            },
        }
    }
}

fn named(inputs: &[(String, f64)], name: &str) -> Option<f64> {
    inputs.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
}

/// One computed metric: the value plus the inputs it was derived from.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DerivedMetric {
    pub value: f64,
    pub inputs: BTreeMap<String, f64>,
}

/// Compute every configured derived metric that has all of its inputs.
pub fn compute(
    specs: &[DerivedMetricSpec],
    statistics: &BTreeMap<String, FieldStats>,
    block: Option<&BlockInfo>,
) -> BTreeMap<String, DerivedMetric> {
    let mut out = BTreeMap::new();
    for spec in specs {
        let Some(calculator) = Calculator::parse(&spec.calculator) else {
            tracing::debug!(
                metric = %spec.name,
                calculator = %spec.calculator,
                "Unknown calculator, metric skipped"
            );
            continue;
        };
        let Some(inputs) = gather_inputs(spec, statistics, block) else {
            continue;
        };
        if let Some(value) = calculator.apply(&inputs) {
            out.insert(
                spec.name.clone(),
                DerivedMetric {
                    value: round2(value),
                    inputs: inputs.into_iter().map(|(n, v)| (n, round2(v))).collect(),
                },
            );
        }
    }
    out
}

/// Gather required inputs in declaration order: numeric means first,
/// then block attributes. `None` as soon as anything is missing.
fn gather_inputs(
    spec: &DerivedMetricSpec,
    statistics: &BTreeMap<String, FieldStats>,
    block: Option<&BlockInfo>,
) -> Option<Vec<(String, f64)>> {
    let mut inputs = Vec::with_capacity(spec.requires_fields.len() + spec.requires_block_data.len());
    for field in &spec.requires_fields {
        inputs.push((field.clone(), statistics.get(field)?.mean));
    }
    for attr in &spec.requires_block_data {
        inputs.push((attr.clone(), block?.attribute(attr)?));
    }
    Some(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, calculator: &str, fields: &[&str], block_data: &[&str]) -> DerivedMetricSpec {
        DerivedMetricSpec {
            name: name.to_string(),
            calculator: calculator.to_string(),
            requires_fields: fields.iter().map(|f| f.to_string()).collect(),
            requires_block_data: block_data.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn stats(pairs: &[(&str, f64)]) -> BTreeMap<String, FieldStats> {
        pairs
            .iter()
            .map(|(name, mean)| {
                (
                    name.to_string(),
                    FieldStats { n: 3, mean: *mean, min: *mean, max: *mean, stdev: 0.0, ci95: None },
                )
            })
            .collect()
    }

    fn block() -> BlockInfo {
        BlockInfo {
            id: 7,
            name: "Block A".into(),
            area_ha: Some(2.0),
            row_spacing_m: Some(2.5),
            vine_spacing_m: Some(1.6),
        }
    }

    #[test]
    fn yield_estimate_worked_example() {
        // 12 bunches * 150 g * 2500 vines/ha / 1e6 = 4.5 t/ha
        let specs = [spec(
            "estimated_yield",
            "yield_t_per_ha",
            &["bunches_per_vine", "bunch_weight_g"],
            &["vines_per_ha"],
        )];
        let stats = stats(&[("bunches_per_vine", 12.0), ("bunch_weight_g", 150.0)]);
        let out = compute(&specs, &stats, Some(&block()));
        let metric = &out["estimated_yield"];
        assert_eq!(metric.value, 4.5);
        assert_eq!(metric.inputs["bunches_per_vine"], 12.0);
        assert_eq!(metric.inputs["vines_per_ha"], 2500.0);
    }

    #[test]
    fn flowers_per_shoot_product() {
        let specs = [spec(
            "flowers",
            "flowers_per_shoot",
            &["inflorescences_per_shoot", "flowers_per_inflorescence"],
            &[],
        )];
        let stats = stats(&[("inflorescences_per_shoot", 2.0), ("flowers_per_inflorescence", 350.0)]);
        let out = compute(&specs, &stats, None);
        assert_eq!(out["flowers"].value, 700.0);
    }

    #[test]
    fn missing_field_input_skips_metric() {
        let specs = [spec(
            "estimated_yield",
            "yield_t_per_ha",
            &["bunches_per_vine", "bunch_weight_g"],
            &["vines_per_ha"],
        )];
        // bunch_weight_g never aggregated any values
        let stats = stats(&[("bunches_per_vine", 12.0)]);
        let out = compute(&specs, &stats, Some(&block()));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_block_data_skips_metric() {
        let specs = [spec("density_check", "divide", &["shoot_count"], &["vines_per_ha"])];
        let stats = stats(&[("shoot_count", 24.0)]);
        assert!(compute(&specs, &stats, None).is_empty());

        let no_spacing = BlockInfo {
            row_spacing_m: None,
            ..block()
        };
        assert!(compute(&specs, &stats, Some(&no_spacing)).is_empty());
    }

    #[test]
    fn unknown_calculator_is_a_no_op() {
        let specs = [spec("mystery", "geometric_mean", &["x"], &[])];
        let stats = stats(&[("x", 2.0)]);
        assert!(compute(&specs, &stats, None).is_empty());
    }

    #[test]
    fn divide_guards_against_zero_denominator() {
        let specs = [spec("ratio", "divide", &["a", "b"], &[])];
        let stats = stats(&[("a", 10.0), ("b", 0.0)]);
        assert!(compute(&specs, &stats, None).is_empty());
    }

    #[test]
    fn divide_uses_declaration_order() {
        let specs = [spec("ratio", "divide", &["a", "b"], &[])];
        let stats = stats(&[("a", 10.0), ("b", 4.0)]);
        assert_eq!(compute(&specs, &stats, None)["ratio"].value, 2.5);
    }

    #[test]
    fn subtract_uses_declaration_order() {
        let specs = [spec("delta", "subtract", &["after", "before"], &[])];
        let stats = stats(&[("after", 3.0), ("before", 10.0)]);
        assert_eq!(compute(&specs, &stats, None)["delta"].value, -7.0);
    }

    #[test]
    fn divide_by_100_single_input() {
        let specs = [spec("fraction", "divide_by_100", &["percent_infected"], &[])];
        let stats = stats(&[("percent_infected", 35.0)]);
        assert_eq!(compute(&specs, &stats, None)["fraction"].value, 0.35);
    }

    #[test]
    fn wrong_arity_skips_metric() {
        let specs = [spec("ratio", "divide", &["a", "b", "c"], &[])];
        let stats = stats(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        assert!(compute(&specs, &stats, None).is_empty());
    }
}
