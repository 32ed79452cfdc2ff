use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Partition mismatch: {branches} parallel branches but {partitions} partition sizes.")]
    PartitionMismatch { branches: usize, partitions: usize },
    #[error("Snapshot mismatch: Expected snapshot for {0}, got {1}.")]
    SnapshotMismatch(&'static str, &'static str),
}

pub mod algorithms;
pub mod boxes;
pub mod builder;
pub mod config;
pub mod context;
pub mod engine;
pub mod generator;
pub mod node_kind;
pub mod nodes;
pub mod outcome;
pub mod parallel;
pub mod retry;
pub mod selector_context;
pub mod stream;

pub use self::algorithms::pagination::{Page, Paginator};
pub use self::boxes::{BoxKind, LayoutBox};
pub use self::builder::GeneratorFactory;
pub use self::config::LayoutConfig;
pub use self::context::{BlockContext, InlineContext, LayoutContext};
pub use self::engine::LayoutEngine;
pub use self::generator::{
    DynamicStyle, Generator, GeneratorCore, GeneratorHandle, GeneratorSnapshot, LayoutGenerator,
    LayoutStrategy,
};
pub use self::node_kind::NodeKind;
pub use self::outcome::LayoutOutcome;
pub use self::parallel::{BranchBuilder, ParallelGenerator, Partition};
pub use self::selector_context::SelectorPropContext;
pub use self::stream::{ContentStream, Token, TokenStream};

#[cfg(test)]
mod test_utils;
