//! Analysis configuration schema.
//!
//! The `*Def` types are the on-disk form; they convert into the runtime
//! types of `xf-components`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xf_components::{
    BalanceOptions, Component, ComponentKind, PairPart, StreamPair, StreamPairConfiguration,
};
use xf_core::Ambient;

use crate::ProjectResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    pub ambient: AmbientDef,
    #[serde(default)]
    pub split_physical_exergy: bool,
    #[serde(default)]
    pub chemical_exergy_enabled: bool,
    /// Pair configurations of multi-stream heat exchangers, by component name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mheatx: BTreeMap<String, PairConfigDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AmbientDef {
    pub t0_k: f64,
    pub p0_pa: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PairPartDef {
    #[default]
    #[serde(rename = "E_PH")]
    Physical,
    #[serde(rename = "E_T")]
    Thermal,
    #[serde(rename = "E_M")]
    Mechanical,
}

/// `[inlet name, outlet name]`.
pub type PairDef = (String, String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PairConfigDef {
    #[serde(default)]
    pub part: PairPartDef,
    #[serde(default)]
    pub hot_pairs: Vec<PairDef>,
    #[serde(default)]
    pub cold_pairs: Vec<PairDef>,
    #[serde(default)]
    pub product_pairs: Vec<PairDef>,
    /// Defaults to the hot pairs when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_pairs: Option<Vec<PairDef>>,
}

impl From<PairPartDef> for PairPart {
    fn from(def: PairPartDef) -> Self {
        match def {
            PairPartDef::Physical => PairPart::Physical,
            PairPartDef::Thermal => PairPart::Thermal,
            PairPartDef::Mechanical => PairPart::Mechanical,
        }
    }
}

fn pairs(defs: &[PairDef]) -> Vec<StreamPair> {
    defs.iter()
        .map(|(inlet, outlet)| StreamPair::new(inlet.as_str(), outlet.as_str()))
        .collect()
}

impl From<&PairConfigDef> for StreamPairConfiguration {
    fn from(def: &PairConfigDef) -> Self {
        StreamPairConfiguration {
            part: def.part.into(),
            hot_pairs: pairs(&def.hot_pairs),
            cold_pairs: pairs(&def.cold_pairs),
            product_pairs: pairs(&def.product_pairs),
            fuel_pairs: def.fuel_pairs.as_deref().map(pairs),
        }
    }
}

impl AnalysisConfig {
    pub fn new(t0_k: f64, p0_pa: f64) -> Self {
        Self {
            ambient: AmbientDef { t0_k, p0_pa },
            split_physical_exergy: false,
            chemical_exergy_enabled: false,
            mheatx: BTreeMap::new(),
        }
    }

    pub fn ambient(&self) -> ProjectResult<Ambient> {
        Ok(Ambient::from_si(self.ambient.t0_k, self.ambient.p0_pa)?)
    }

    pub fn options(&self) -> BalanceOptions {
        BalanceOptions {
            split_physical_exergy: self.split_physical_exergy,
            chemical_exergy_enabled: self.chemical_exergy_enabled,
        }
    }

    /// Pair configuration of the named component, if any.
    pub fn pair_config(&self, component: &str) -> Option<StreamPairConfiguration> {
        self.mheatx.get(component).map(StreamPairConfiguration::from)
    }

    /// Attach the matching pair configuration to a multi-stream heat
    /// exchanger. Other kinds are left untouched.
    pub fn configure(&self, component: &mut Component) {
        if component.kind() == ComponentKind::MultiStreamHeatExchanger {
            component.set_pair_config(self.pair_config(component.name()));
        }
    }
}
