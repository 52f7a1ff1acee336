//! Configuration validation logic.

use crate::schema::{AnalysisConfig, PairConfigDef, PairDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing pairs: {component} has no {what}")]
    MissingPairs { component: String, what: String },

    #[error("Empty name in {context}")]
    EmptyName { context: String },
}

pub fn validate_config(config: &AnalysisConfig) -> Result<(), ValidationError> {
    positive("ambient.t0_k", config.ambient.t0_k)?;
    positive("ambient.p0_pa", config.ambient.p0_pa)?;

    for (component, def) in &config.mheatx {
        if component.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                context: "mheatx component".to_string(),
            });
        }
        validate_pair_config(component, def)?;
    }

    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: "must be finite and positive".to_string(),
    })
}

fn validate_pair_config(component: &str, def: &PairConfigDef) -> Result<(), ValidationError> {
    if def.product_pairs.is_empty() {
        return Err(ValidationError::MissingPairs {
            component: component.to_string(),
            what: "product pairs".to_string(),
        });
    }

    let fuel = def.fuel_pairs.as_ref().unwrap_or(&def.hot_pairs);
    if fuel.is_empty() {
        return Err(ValidationError::MissingPairs {
            component: component.to_string(),
            what: "fuel pairs or hot pairs".to_string(),
        });
    }

    let groups: [(&str, &[PairDef]); 4] = [
        ("hot_pairs", &def.hot_pairs),
        ("cold_pairs", &def.cold_pairs),
        ("product_pairs", &def.product_pairs),
        ("fuel_pairs", def.fuel_pairs.as_deref().unwrap_or(&[])),
    ];
    for (group, pairs) in groups {
        if pairs
            .iter()
            .any(|(inlet, outlet)| inlet.trim().is_empty() || outlet.trim().is_empty())
        {
            return Err(ValidationError::EmptyName {
                context: format!("{component}.{group}"),
            });
        }
    }

    Ok(())
}
