//! The tagged value tree shared by the json-bind parser seam, binders, and
//! writer seam.

mod kind;
mod node;

pub use kind::NodeKind;
pub use node::Node;
