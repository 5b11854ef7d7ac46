//! Text rendering of a farm snapshot.
//!
//! The grid shows map tiles as `G`/`U`/`S`, plants by growth phase and the
//! player as an arrow for the direction they face.

use homestead_common::{Direction, Position};
use homestead_gameplay::{FarmSnapshot, GrowthPhase, ItemViewState};
use std::collections::HashMap;
use std::fmt::Write;

use crate::config::DisplayConfig;

/// Glyph drawn for a plant in a given phase.
pub const fn phase_glyph(phase: GrowthPhase) -> char {
    match phase {
        GrowthPhase::Seed => '.',
        GrowthPhase::Sprout => ',',
        GrowthPhase::Growing => 'i',
        GrowthPhase::Mature => '*',
    }
}

/// Glyph drawn for the player.
pub const fn player_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Renders the snapshot as a multi-line string.
pub fn render_text(snapshot: &FarmSnapshot, display: &DisplayConfig) -> String {
    let mut out = String::new();
    let info = snapshot.info;
    let _ = writeln!(
        out,
        "Day {} | Money: ${} | Energy: {}",
        info.day, info.money, info.energy
    );

    let plants: HashMap<Position, GrowthPhase> = snapshot
        .plants
        .iter()
        .map(|p| (p.position, p.phase))
        .collect();

    for (row, line) in snapshot.map.iter().enumerate() {
        let rendered: String = line
            .chars()
            .enumerate()
            .map(|(col, tile)| {
                let here = Position::new(row, col);
                if here == snapshot.player_position {
                    player_glyph(snapshot.player_direction)
                } else {
                    plants.get(&here).map_or(tile, |&phase| phase_glyph(phase))
                }
            })
            .collect();
        out.push_str(&rendered);
        out.push('\n');
    }

    if display.show_legend {
        let legend: Vec<String> = [
            GrowthPhase::Seed,
            GrowthPhase::Sprout,
            GrowthPhase::Growing,
            GrowthPhase::Mature,
        ]
        .into_iter()
        .map(|phase| format!("{} {}", phase_glyph(phase), phase.display_name()))
        .collect();
        let _ = writeln!(out, "Legend: {}", legend.join(", "));
    }

    if display.show_items {
        for item in &snapshot.items {
            let marker = match item.state {
                ItemViewState::Selected => '>',
                ItemViewState::Unselected => ' ',
                ItemViewState::Empty => '-',
            };
            let _ = write!(out, "{marker} {}: {}", item.name, item.amount);
            if let Some(buy) = item.buy_price {
                let _ = write!(out, " (buy ${buy})");
            }
            let _ = writeln!(out, " (sell ${})", item.sell_price);
        }
    }
    out
}
