// Conversation context accumulation

pub mod accumulator;

pub use accumulator::ContextAccumulator;
