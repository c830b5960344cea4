//! Transform pipeline infrastructure
//!
//! A small composable system for chaining the processing stages. Any stage can be
//! chained with another when the output type of the first is the input type of the
//! second.
//!
//! # The `Runnable` Trait
//!
//! Every stage implements `Runnable<I, O>`:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> O;
//! }
//! ```
//!
//! Parsing never fails, so neither does a stage: `run` returns the output directly.
//!
//! # The `Transform<I, O>` Type
//!
//! A boxed, composable pipeline. `.then()` appends a stage:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(|source: String| source)
//!     .then(Tokenize)                  // String → Vec<Token>
//!     .then(ParseBlocks::default())    // Vec<Token> → BlockTree
//!     .then(ResolveInlines);           // BlockTree → Root
//! ```
//!
//! # Static Pipelines
//!
//! The usual paths are pre-built in [`standard`] as `once_cell::sync::Lazy` statics:
//!
//! ```rust
//! use marktree::markdown::transforms::standard::PARSING;
//!
//! let root = PARSING.run("# Hello\n".to_string());
//! assert_eq!(root.children.len(), 1);
//! ```
//!
//! # Module Organization
//!
//! - [`stages`]: the individual stages (tokenization, block parsing, inline resolution)
//! - [`standard`]: pre-built pipelines

pub mod stages;
pub mod standard;

/// Anything that transforms an input into an output.
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> O;
}

/// A composable transformation from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> O + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Append a stage, extending the output type to the stage's output.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| stage.run(prev_run(input))),
        }
    }

    /// Append a pre-built static transform.
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| next.run(prev_run(input))),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> O {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> O {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DoubleNumber;
    impl Runnable<i32, i32> for DoubleNumber {
        fn run(&self, input: i32) -> i32 {
            input * 2
        }
    }

    struct IntToString;
    impl Runnable<i32, String> for IntToString {
        fn run(&self, input: i32) -> String {
            input.to_string()
        }
    }

    static DOUBLED: once_cell::sync::Lazy<Transform<i32, i32>> =
        once_cell::sync::Lazy::new(|| Transform::from_fn(|x: i32| x).then(DoubleNumber));

    #[test]
    fn test_transform_from_fn() {
        let transform = Transform::from_fn(|x: i32| x + 1);
        assert_eq!(transform.run(5), 6);
    }

    #[test]
    fn test_type_changing_chain() {
        let transform = Transform::from_fn(|x: i32| x)
            .then(DoubleNumber)
            .then(DoubleNumber)
            .then(IntToString);
        assert_eq!(transform.run(5), "20");
    }

    #[test]
    fn test_then_transform_reuses_static() {
        let transform = Transform::from_fn(|x: i32| x + 1).then_transform(&DOUBLED);
        assert_eq!(transform.run(4), 10);
    }
}
