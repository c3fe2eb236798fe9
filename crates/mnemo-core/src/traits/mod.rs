mod admission;
mod decay_engine;
mod similarity;
mod storage;

pub use admission::{AcceptAll, IAdmissionAuthority};
pub use decay_engine::IDecayEngine;
pub use similarity::ISimilarityOracle;
pub use storage::IAtomStore;
