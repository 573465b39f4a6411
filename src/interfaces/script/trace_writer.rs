use crate::application::flow::Screen;
use crate::application::processing::Stage;
use crate::error::Result;
use std::io::Write;

/// Writes the line-oriented flow trace the CLI prints: screen transitions,
/// processing stages, and per-event outcomes.
pub struct TraceWriter<W: Write> {
    out: W,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    pub fn screen(&mut self, screen: Screen) -> Result<()> {
        writeln!(self.out, "screen: {screen}")?;
        Ok(())
    }

    pub fn stage(&mut self, stage: Stage) -> Result<()> {
        writeln!(self.out, "stage: {stage} - {}", stage.label())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_lines() {
        let mut buf = Vec::new();
        let mut writer = TraceWriter::new(&mut buf);
        writer.screen(Screen::Login).unwrap();
        writer.stage(Stage::Validating).unwrap();
        writer.line("login ok: a@b.c").unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "screen: login\nstage: validating - Validating links…\nlogin ok: a@b.c\n"
        );
    }
}
