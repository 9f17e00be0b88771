pub mod cleaning_service;
pub mod dataset_balancer;
pub mod dataset_loader;
pub mod features;
pub mod label_regenerator;

pub use cleaning_service::{CleaningReport, CleaningService};
pub use dataset_balancer::{ClassCounts, DatasetBalancer, DEFAULT_BALANCE_SEED};
pub use dataset_loader::{DatasetLoader, LoadedDataset};
pub use features::{train_test_split, training_pairs, FeatureVector, TrainTestSplit};
pub use label_regenerator::{
    InterceptLabel, LabelRegenerator, LabelStrategy, LabelStrategyKind, OneStepLookahead,
    Relabeled,
};
