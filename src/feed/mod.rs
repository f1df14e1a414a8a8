// Feed aggregation engine.
// Raw postings come in from the configured board sources; a refresh pass
// funnels them through normalize -> dedup -> sort and publishes the result
// as one immutable snapshot that the query side reads without blocking.

pub mod normalize;
pub mod query;
pub mod refresh;
pub mod store;
pub mod timestamp;
