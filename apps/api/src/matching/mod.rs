// Candidate/job matching: term similarity, six weighted sub-scores, gap analysis.
// Everything except `handlers` is pure and synchronous.

pub mod dimensions;
pub mod gaps;
pub mod handlers;
pub mod scorer;
pub mod similarity;
pub mod weights;
