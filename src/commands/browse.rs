//! Interactive session: every input line becomes the search text.

use anyhow::{Context, Result};
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;

use crate::pipeline::{FetchPipeline, PipelineState};

use super::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    Query(String),
    /// 1-based row of the current list.
    Open(usize),
    Refresh,
    Quit,
    Invalid(String),
}

pub fn parse_input(line: &str) -> BrowseInput {
    let Some(command) = line.trim().strip_prefix(':') else {
        return BrowseInput::Query(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("q" | "quit"), None) => BrowseInput::Quit,
        (Some("r" | "refresh"), None) => BrowseInput::Refresh,
        (Some("o" | "open"), Some(row)) => match row.parse::<usize>() {
            Ok(n) if n > 0 => BrowseInput::Open(n),
            _ => BrowseInput::Invalid(format!("Invalid row {:?}", row)),
        },
        _ => BrowseInput::Invalid(format!("Unknown command {:?}", line.trim())),
    }
}

/// Runs until `:quit` or end of input, then shuts the pipeline down.
///
/// `:quit` stops right away. At end of input a pending search still runs
/// and its outcome is printed before the session ends.
#[tracing::instrument(skip(pipeline, input))]
pub async fn browse<R: AsyncBufRead + Unpin>(
    pipeline: FetchPipeline,
    input: R,
    per_page: u32,
) -> Result<()> {
    println!("Type to search, :open N for details, :refresh to reload, :quit to exit.");
    pipeline.refresh_default_listing(1, per_page);

    let mut updates = pipeline.subscribe();
    let mut shown = PipelineState::default();
    let mut lines = input.lines();
    let mut drain = false;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!("Input closed, finishing pending work");
                    drain = true;
                    break;
                };
                match parse_input(&line) {
                    BrowseInput::Quit => break,
                    BrowseInput::Refresh => pipeline.refresh_default_listing(1, per_page),
                    BrowseInput::Open(row) => println!("{}", open_row(&pipeline.snapshot(), row)),
                    BrowseInput::Invalid(message) => println!("{}", message),
                    BrowseInput::Query(text) => pipeline.set_query(text),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                show_update(&pipeline, &mut updates, &mut shown);
            }
        }
    }

    if drain {
        let idle = pipeline.wait_until_idle();
        tokio::pin!(idle);
        loop {
            tokio::select! {
                _ = &mut idle => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    show_update(&pipeline, &mut updates, &mut shown);
                }
            }
        }
        if updates.has_changed().unwrap_or(false) {
            show_update(&pipeline, &mut updates, &mut shown);
        }
    }

    pipeline.shutdown().await;
    Ok(())
}

/// Prints what changed since `shown`; a displayed error is acknowledged.
fn show_update(
    pipeline: &FetchPipeline,
    updates: &mut watch::Receiver<PipelineState>,
    shown: &mut PipelineState,
) {
    let state = updates.borrow_and_update().clone();
    if let Some(output) = render::format_update(shown, &state) {
        println!("{}", output);
    }
    if state.last_error.is_some() {
        pipeline.acknowledge_error();
    }
    *shown = state;
}

fn open_row(state: &PipelineState, row: usize) -> String {
    match state.items.get(row - 1) {
        Some(repo) => render::format_detail(repo),
        None => format!("No repository at row {} ({} shown)", row, state.items.len()),
    }
}
