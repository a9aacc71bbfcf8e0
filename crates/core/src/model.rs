use serde::{Deserialize, Serialize};

/// The closed set of embedding models the inference DAG can run.
///
/// Wire values are the model identifiers the Helical library exposes.
/// Anything outside this set is rejected at the API boundary; the enum being
/// closed is what makes that a 422 instead of a failed run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingModel {
    C2s,
    /// Default when reconstructing inputs from a conf that lacks a model.
    #[default]
    Geneformer,
    Genept,
    HelixMrna,
    HyenaDna,
    Mamba2Mrna,
    #[serde(rename = "scgpt")]
    ScGpt,
    Transcriptformer,
    Uce,
}
