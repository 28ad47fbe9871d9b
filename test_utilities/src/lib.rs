pub use presentations::{
    coxeter_a3, cyclic, free_group, klein_four, presentation_fixture, symmetric_three,
};
pub use verification::{assert_closed, assert_consistent, assert_transitive};

mod presentations;
mod verification;
