// Parsers for model replies

pub mod reply;

pub use reply::{
    parse_decisions, parse_ideas, parse_tagged_block, ParseRule, ParsedReply, DECISIONS_TAG,
    IDEAS_TAG,
};
