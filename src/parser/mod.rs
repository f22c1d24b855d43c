//! Doc-comment parser: classes, functions and their parameters.
//!
//! Blocks are offered to the class parser first and to the function parser
//! second. Functions attach to the active class of the [`ParseContext`],
//! which is the class parsed most recently in the same pass.

pub mod blocks;
pub mod markers;
pub mod param;

use crate::error::{Error, Result};
use crate::model::{Function, Klass, Visibility};
use tracing::{debug, warn};

pub use blocks::{find_blocks, Blocks};
pub use param::parse_param;

/// Parse a class block. `None` when the block has no `@class` marker.
///
/// Whatever text is left after the class and visibility markers are cut out
/// becomes the class prose, untouched.
pub fn parse_class(block: &str) -> Option<Klass> {
    let (name, rest) = markers::class_name(block)?;
    let (visibility, rest) = take_visibility(rest);
    Some(Klass {
        name,
        visibility,
        functions: Vec::new(),
        guide_markdown: rest,
    })
}

/// Parse a function block. `Ok(None)` when the block has no `@method` marker.
///
/// The returned function is not attached to any class yet.
pub fn parse_function(block: &str) -> Result<Option<Function>> {
    let Some((name, rest)) = markers::function_name(block) else {
        return Ok(None);
    };
    let (visibility, mut rest) = take_visibility(rest);

    let mut params = Vec::new();
    while let Some((captured, remaining)) = markers::param(&rest) {
        params.push(parse_param(&captured, block)?);
        rest = remaining;
    }

    let (ujs, rest) = markers::ujs_flag(&rest);

    Ok(Some(Function {
        name,
        visibility,
        params,
        ujs,
        guide_markdown: rest,
        klass: String::new(),
    }))
}

fn take_visibility(block: String) -> (Visibility, String) {
    match markers::visibility(&block) {
        Some((visibility, rest)) => (visibility, rest),
        None => (Visibility::default(), block),
    }
}

/// What a single block turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Klass(String),
    Function { klass: String, name: String },
    Ignored,
}

/// State of one parse pass: the classes found so far and the active class.
#[derive(Debug, Default)]
pub struct ParseContext {
    klasses: Vec<Klass>,
    active: Option<usize>,
    strict: bool,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode, unrecognized blocks and functions documented before
    /// any class are errors instead of being skipped.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn klasses(&self) -> &[Klass] {
        &self.klasses
    }

    pub fn into_klasses(self) -> Vec<Klass> {
        self.klasses
    }

    pub fn active_class(&self) -> Option<&Klass> {
        self.active.map(|i| &self.klasses[i])
    }

    /// Forget the active class, e.g. at a file boundary.
    pub fn reset_active_class(&mut self) {
        self.active = None;
    }

    /// Parse every doc-comment block of one source text, in order.
    /// Returns the number of blocks that produced a class or function.
    pub fn parse_source(&mut self, source: &str) -> Result<usize> {
        let mut parsed = 0;
        for block in find_blocks(source).iter() {
            if self.parse_block(&block)? != Parsed::Ignored {
                parsed += 1;
            }
        }
        Ok(parsed)
    }

    /// Parse one unindented block and record the result.
    pub fn parse_block(&mut self, block: &str) -> Result<Parsed> {
        if let Some(klass) = parse_class(block) {
            debug!(name = %klass.name, "parsed class");
            let name = klass.name.clone();
            self.klasses.push(klass);
            self.active = Some(self.klasses.len() - 1);
            return Ok(Parsed::Klass(name));
        }

        if let Some(mut function) = parse_function(block)? {
            let Some(active) = self.active else {
                if self.strict {
                    return Err(Error::FunctionWithoutClass {
                        function: function.name,
                    });
                }
                warn!(name = %function.name, "function documented before any class, skipping");
                return Ok(Parsed::Ignored);
            };
            let klass = &mut self.klasses[active];
            debug!(name = %function.name, klass = %klass.name, "parsed function");
            function.klass = klass.name.clone();
            let parsed = Parsed::Function {
                klass: klass.name.clone(),
                name: function.name.clone(),
            };
            klass.functions.push(function);
            return Ok(parsed);
        }

        if self.strict {
            return Err(Error::UnrecognizedBlock(block.to_string()));
        }
        debug!(block = %block, "block has no class or function marker");
        Ok(Parsed::Ignored)
    }
}
