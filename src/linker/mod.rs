pub mod engine;
pub mod neighbor;

pub use engine::link;
pub use neighbor::{
    find_neighbor,
    sorted_order,
};
