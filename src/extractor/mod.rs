pub mod path;
pub mod payload;
pub mod validated;

/// Gives access to the value produced by a wrapping extractor.
pub trait Extractor {
    type Extracted;

    fn extracted(&self) -> &Self::Extracted;
}
