pub mod error;
pub mod subconverter;

pub use error::ConvertError;
pub use subconverter::{
    convert_merged, convert_nodes, convert_one, convert_url, preview, ConvertOutput, MergeOutput,
    MergePreview, MergeSummary, PreviewNode, SubconverterConfig, SubconverterConfigBuilder,
};
