use std::io::{self, Write};

use ansi_term::{Colour, Style};

use crate::{
    storage::{activity_log::ActivityLog, entities::ActivityRecord, slot::LogSlot},
    tracker::{
        notice::{Notice, Variant},
        Tracker,
    },
    utils::time::{format_duration, format_seconds, seconds_to_duration},
};

use super::command::HELP;

/// Renders everything the user sees. Output is plain text, optionally colored.
pub struct Presenter<W: Write> {
    out: W,
    colored: bool,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn banner(&mut self) -> io::Result<()> {
        let title = self.paint(Style::new().bold(), "ChronoFlow Time Tracker");
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "Type \"help\" to see available commands.")?;
        self.out.flush()
    }

    pub fn notice(&mut self, notice: &Notice) -> io::Result<()> {
        let style = match notice.variant() {
            Variant::Default => Style::new().bold(),
            Variant::Destructive => Colour::Red.bold(),
        };
        let title = self.paint(style, notice.title());
        writeln!(self.out, "{title}: {}", notice.description())?;
        self.out.flush()
    }

    /// Reports an infrastructure failure that doesn't end the session.
    pub fn failure(&mut self, title: &str, error: &anyhow::Error) -> io::Result<()> {
        let title = self.paint(Colour::Red.bold(), title);
        writeln!(self.out, "{title}: {error}")?;
        self.out.flush()
    }

    pub fn status(&mut self, tracker: &Tracker) -> io::Result<()> {
        let clock = self.paint(Style::new().bold(), &format_seconds(tracker.elapsed()));
        let name = &tracker.state().activity_name;
        if name.is_empty() {
            writeln!(self.out, "{clock}  {}", tracker.prompt())?;
        } else {
            writeln!(self.out, "{clock}  {name}  ({})", tracker.prompt())?;
        }

        let controls = tracker.controls();
        let available = [
            (controls.start, "start"),
            (controls.resume, "resume"),
            (controls.pause, "pause"),
            (controls.stop, "stop"),
            (controls.reset, "reset"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
        .collect::<Vec<_>>();
        if available.is_empty() {
            writeln!(self.out, "Available: name")?;
        } else {
            writeln!(self.out, "Available: {}", available.join(", "))?;
        }
        self.out.flush()
    }

    /// Prints completed activities, the most recent first.
    pub fn activities<S: LogSlot>(
        &mut self,
        log: &ActivityLog<S>,
        limit: Option<usize>,
    ) -> io::Result<()> {
        let title = self.paint(Style::new().bold(), "Completed activities");
        writeln!(self.out, "{title}")?;
        if log.is_empty() {
            writeln!(self.out, "No activities yet.")?;
            return self.out.flush();
        }

        let shown = log
            .newest_first()
            .take(limit.unwrap_or(usize::MAX))
            .collect::<Vec<_>>();
        for record in &shown {
            writeln!(
                self.out,
                "{:>10}\t{}",
                format_duration(seconds_to_duration(record.duration)),
                record.name
            )?;
        }

        // The total covers only the listed activities.
        let total = shown
            .iter()
            .fold(0u64, |sum, v| sum.saturating_add(v.duration));
        let total = format_duration(seconds_to_duration(total));
        if shown.len() == log.len() {
            writeln!(self.out, "Total: {total} in {} activities", log.len())?;
        } else {
            writeln!(
                self.out,
                "Total: {total} in {} of {} activities",
                shown.len(),
                log.len()
            )?;
        }
        self.out.flush()
    }

    /// Prints completed activities, the most recent first, as a JSON array.
    pub fn activities_json<S: LogSlot>(
        &mut self,
        log: &ActivityLog<S>,
        limit: Option<usize>,
    ) -> io::Result<()> {
        let records = log
            .newest_first()
            .take(limit.unwrap_or(usize::MAX))
            .collect::<Vec<&ActivityRecord>>();
        serde_json::to_writer_pretty(&mut self.out, &records)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}")?;
        self.out.flush()
    }

    pub fn unknown(&mut self, word: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "Unknown command \"{word}\". Type \"help\" to see available commands."
        )?;
        self.out.flush()
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colored {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}
