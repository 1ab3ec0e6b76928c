//! vc-graph: component/junction arena for the cycle engine.
//!
//! Provides:
//! - `Component`, `Port`, `Junction` and the immutable `Graph`
//! - `GraphBuilder`, which resolves named ports and validates on `build()`
//!
//! Junctions are directed edges from an outlet port to an inlet port; each
//! carries a fluid. A built graph has no dangling ports, no direction or
//! fluid mismatches, and is connected.
//!
//! # Example
//!
//! ```
//! use vc_graph::{GraphBuilder, PortName};
//! use vc_fluids::Fluid;
//!
//! let mut builder = GraphBuilder::new();
//! let src = builder.add_component("src", &[PortName::OutletA]);
//! let snk = builder.add_component("snk", &[PortName::InletA]);
//! builder.add_junction("src_snk", Fluid::Air, (src, PortName::OutletA), (snk, PortName::InletA));
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.components().len(), 2);
//! assert_eq!(graph.junctions().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Component, Graph, Junction, Port, PortKind, PortName, Stream};
