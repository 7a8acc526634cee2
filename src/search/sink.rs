use std::fmt;
use std::io::Write;

use crate::search::node::Trail;
use crate::search::SearchError;

/// Receives each solution trail, in discovery order.
pub trait SolutionSink<S> {
    fn emit(&mut self, trail: &Trail<S>) -> Result<(), SearchError>;
}

impl<S: Copy> SolutionSink<S> for Vec<Trail<S>> {
    fn emit(&mut self, trail: &Trail<S>) -> Result<(), SearchError> {
        self.push(trail.clone());
        Ok(())
    }
}

impl<S, K: SolutionSink<S> + ?Sized> SolutionSink<S> for &mut K {
    fn emit(&mut self, trail: &Trail<S>) -> Result<(), SearchError> {
        (**self).emit(trail)
    }
}

/// Writes one line per solution: the trail's squares separated by spaces.
#[derive(Debug)]
pub struct LinePrinter<W> {
    out: W,
    lines: u64,
}

impl<W: Write> LinePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<S: fmt::Display, W: Write> SolutionSink<S> for LinePrinter<W> {
    fn emit(&mut self, trail: &Trail<S>) -> Result<(), SearchError> {
        writeln!(self.out, "{trail}").map_err(|source| SearchError::Emit {
            trail: trail.to_string(),
            source,
        })?;
        self.lines += 1;
        Ok(())
    }
}

/// Forwards every solution to both sinks, first `.0` then `.1`.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<S, A: SolutionSink<S>, B: SolutionSink<S>> SolutionSink<S> for Tee<A, B> {
    fn emit(&mut self, trail: &Trail<S>) -> Result<(), SearchError> {
        self.0.emit(trail)?;
        self.1.emit(trail)
    }
}
