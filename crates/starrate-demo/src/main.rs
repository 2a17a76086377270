//! Command-line playground for the rating widget.
//!
//! Usage: starrate-demo [--config widget.json] [TAP...]
//!
//! Each `TAP` is `INDEX:OFFSET`, a tap on star `INDEX` at `OFFSET` from its
//! left edge. After every selection the host feeds the new rating back into
//! the widget, as a real UI would, and the row is printed again. Set
//! `RUST_LOG=debug` to watch the widget's decisions.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use starrate_core::{
    AnimationHandle, RatingWidget, StarAnimation, StarElement, StarFill, TapOutcome, WidgetConfig,
};

#[derive(Parser, Debug)]
#[command(name = "starrate-demo")]
#[command(about = "Replay taps against a star-rating widget and print the row")]
struct Args {
    /// Widget configuration as JSON (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Taps to replay, each INDEX:OFFSET
    #[arg(value_parser = parse_tap)]
    taps: Vec<Tap>,
}

/// A tap on star `index`, `offset_x` from its left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    index: usize,
    offset_x: f64,
}

fn parse_tap(arg: &str) -> Result<Tap, String> {
    let (index, offset) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected INDEX:OFFSET, got {arg:?}"))?;
    let index = index
        .parse()
        .map_err(|e| format!("bad star index {index:?}: {e}"))?;
    let offset_x = offset
        .parse()
        .map_err(|e| format!("bad offset {offset:?}: {e}"))?;
    Ok(Tap { index, offset_x })
}

/// Animation handle that logs instead of animating.
struct LoggingHandle {
    index: usize,
}

impl AnimationHandle for LoggingHandle {
    fn play(&self, animation: StarAnimation, duration: Duration) {
        log::info!(
            "star {} plays {} for {}ms",
            self.index,
            animation,
            duration.as_millis()
        );
    }
}

fn render_row(elements: &[StarElement]) -> String {
    let mut slots: Vec<_> = elements.iter().collect();
    slots.sort_by_key(|element| element.slot);
    slots
        .into_iter()
        .map(|element| match element.fill {
            StarFill::Full => '★',
            StarFill::Half => '⯪',
            StarFill::Empty => '☆',
        })
        .collect()
}

fn load_config(path: Option<&PathBuf>) -> Result<WidgetConfig> {
    let Some(path) = path else {
        return Ok(WidgetConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    WidgetConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    log::info!("Widget config: {}", serde_json::to_string(&config)?);

    let selected = Rc::new(Cell::new(None));
    let sink = Rc::clone(&selected);
    let mut widget = RatingWidget::new(config, move |rating| sink.set(Some(rating)));

    // Handles must outlive the widget's weak references to them.
    let handles: Vec<Rc<dyn AnimationHandle>> = (0..widget.config().max_stars)
        .map(|index| Rc::new(LoggingHandle { index }) as Rc<dyn AnimationHandle>)
        .collect();
    widget.mount(&handles)?;

    println!("{}  ({})", render_row(&widget.render()), widget.config().rating);

    for tap in args.taps {
        match widget.handle_tap(tap.index, tap.offset_x) {
            TapOutcome::Selected(_) => {
                if let Some(rating) = selected.take() {
                    let next = widget.config().clone().with_rating(rating);
                    widget.update_config(next);
                }
                println!("{}  ({})", render_row(&widget.render()), widget.config().rating);
            }
            TapOutcome::Rejected(reason) => {
                println!("tap {}:{} rejected: {:?}", tap.index, tap.offset_x, reason);
            }
        }
    }

    widget.unmount();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tap() {
        let tap = parse_tap("2:12.5").unwrap();
        assert_eq!(tap, Tap { index: 2, offset_x: 12.5 });
        assert!(parse_tap("2").is_err());
        assert!(parse_tap("x:1").is_err());
    }

    #[test]
    fn test_args_config_after_taps() {
        let args = Args::try_parse_from(["starrate-demo", "1:5", "--config", "x.json", "3:30"])
            .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("x.json")));
        assert_eq!(
            args.taps,
            vec![
                Tap { index: 1, offset_x: 5.0 },
                Tap { index: 3, offset_x: 30.0 },
            ]
        );
    }

    #[test]
    fn test_args_without_taps() {
        let args = Args::try_parse_from(["starrate-demo"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.taps.is_empty());
    }

    #[test]
    fn test_args_reject_bad_tap() {
        assert!(Args::try_parse_from(["starrate-demo", "oops"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_tap() {
        let err = Args::try_parse_from(["starrate-demo", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_render_row_uses_visual_order() {
        let config = WidgetConfig::new().with_rating(1.5).with_half_stars(true);
        let widget = RatingWidget::new(config.clone(), |_| {});
        assert_eq!(render_row(&widget.render()), "★⯪☆☆☆");

        let widget = RatingWidget::new(config.with_reversed(true), |_| {});
        assert_eq!(render_row(&widget.render()), "☆☆☆⯪★");
    }
}
