//! Pipeline driver
//!
//! Streams a G-code file line by line through tokenizer, argument decoder
//! and motion state machine, then runs the optional subdivision pass and the
//! classifier. A parse either returns a complete [`PathModel`] or fails with
//! a [`ParseError`]; the input file is released on every exit path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::classify::classify;
use crate::context::ParseContext;
use crate::line::tokenize;
use crate::model::PathModel;
use crate::state::MotionState;
use printlapse_core::error::ParseResult;
use printlapse_core::settings::ImportSettings;

/// G-code importer configured by [`ImportSettings`]
#[derive(Debug, Clone, Default)]
pub struct GcodeImporter {
    settings: ImportSettings,
}

impl GcodeImporter {
    /// Create an importer with the given settings
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }

    /// Create an importer with default settings
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The importer's settings
    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Import a G-code file from disk
    pub fn import_file(&self, path: impl AsRef<Path>) -> ParseResult<PathModel> {
        let path = path.as_ref();
        info!(path = %path.display(), "importing G-code file");
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        self.import_lines(reader.lines())
    }

    /// Import G-code from an in-memory string
    pub fn import_str(&self, input: &str) -> ParseResult<PathModel> {
        self.import_lines(input.lines().map(|l| Ok(l.to_string())))
    }

    fn import_lines(
        &self,
        lines: impl Iterator<Item = std::io::Result<String>>,
    ) -> ParseResult<PathModel> {
        let mut ctx = ParseContext::new();
        let mut state = MotionState::new();
        let mut model = PathModel::default();

        for line in lines {
            let raw = line?;
            let stripped = raw.trim_end();
            ctx.begin_line(stripped);

            let tokens = tokenize(stripped);
            ctx.set_comment(tokens.comment);

            if let Some(code) = tokens.code {
                if let Some(segment) = state.apply(&ctx, code, tokens.args)? {
                    model.segments.push(segment);
                }
            }
        }

        if self.settings.subdivide {
            crate::subdivide::subdivide(&mut model, self.settings.max_segment_size);
        }
        classify(&mut model);

        debug!(
            lines = ctx.line_number(),
            segments = model.segments.len(),
            layers = model.layers.len(),
            "import complete"
        );
        Ok(model)
    }
}
