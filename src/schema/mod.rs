pub mod fallback;
pub mod types;

pub use fallback::Fallback;
pub use types::{
    Channel, ChannelFigures, ChannelPerformance, ContractStatus, Dataset, Monthly, PartnerRecord,
    Partners, PerformanceSnapshot,
};
