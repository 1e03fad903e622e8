//! Plain-text rendering of scorecards and results.

use scorebook_core::format_rate;
use scorebook_match::{InningsState, ScorecardView};
use scorebook_projection::{BallCell, OverRow};
use std::fmt::Write;

fn over_cells(row: &OverRow) -> String {
    row.cells
        .iter()
        .map(|cell| match cell {
            BallCell::Bowled { glyph, .. } => glyph.as_str(),
            BallCell::NotYetBowled => ".",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one innings card
pub fn scorecard(card: &ScorecardView) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_scorecard(&mut out, card)?;
    Ok(out)
}

fn write_scorecard(out: &mut String, card: &ScorecardView) -> std::fmt::Result {
    writeln!(
        out,
        "Innings {}: {} batting, {} bowling",
        card.innings, card.batting_team, card.bowling_team
    )?;
    if let Some(text) = &card.placeholder {
        writeln!(out, "  {}", text)?;
        if let Some(target) = card.target {
            writeln!(out, "  Target {}", target)?;
        }
        return Ok(());
    }

    write!(
        out,
        "{} ({} ov)  RR {}",
        card.score,
        card.overs,
        card.run_rate_text()
    )?;
    if let Some(projected) = card.projected_score {
        write!(out, "  Projected {}", projected)?;
    }
    if let Some(reason) = card.completion.filter(|_| card.state == InningsState::Completed) {
        write!(out, "  [{}]", reason)?;
    }
    writeln!(out)?;

    writeln!(out)?;
    writeln!(
        out,
        "{:<14} {:<24} {:>4} {:>4} {:>3} {:>3} {:>7}",
        "Batter", "", "R", "B", "4s", "6s", "SR"
    )?;
    for b in card.batted() {
        writeln!(
            out,
            "{:<14} {:<24} {:>4} {:>4} {:>3} {:>3} {:>7}",
            b.name.as_str(),
            b.status_text(),
            b.runs,
            b.balls_faced,
            b.fours,
            b.sixes,
            format_rate(b.strike_rate())
        )?;
    }
    let waiting: Vec<&str> = card.yet_to_bat().map(|b| b.name.as_str()).collect();
    if !waiting.is_empty() {
        writeln!(out, "Yet to bat: {}", waiting.join(", "))?;
    }
    let extras = &card.totals.extras;
    writeln!(
        out,
        "Extras: {} (wd {}, nb {}, b {}, lb {}, pen {})",
        extras.wides + extras.no_balls + extras.byes + extras.leg_byes + extras.penalties,
        extras.wides,
        extras.no_balls,
        extras.byes,
        extras.leg_byes,
        extras.penalties
    )?;

    writeln!(out)?;
    writeln!(
        out,
        "{:<14} {:>5} {:>3} {:>4} {:>3} {:>6} {:>3} {:>3}",
        "Bowler", "O", "M", "R", "W", "Econ", "Wd", "Nb"
    )?;
    for b in &card.bowling {
        writeln!(
            out,
            "{:<14} {:>5} {:>3} {:>4} {:>3} {:>6} {:>3} {:>3}",
            b.name.as_str(),
            b.overs(),
            b.maidens,
            b.runs_conceded,
            b.wickets,
            format_rate(b.economy()),
            b.wides,
            b.no_balls
        )?;
    }

    writeln!(out)?;
    for row in card.over_grid.started() {
        writeln!(
            out,
            "Over {:>2}: {:<24} {}",
            row.over + 1,
            over_cells(row),
            row.summary()
        )?;
    }
    if card.state == InningsState::Live {
        let current = &card.current_over;
        writeln!(
            out,
            "This over: {}/6 [{}] {} runs",
            current.legal_balls,
            current.glyphs.join(" "),
            current.runs
        )?;
    }
    if !card.recent_balls.is_empty() {
        let recent: Vec<String> = card
            .recent_balls
            .iter()
            .map(|b| format!("{} {}", b.label, b.glyph))
            .collect();
        writeln!(out, "Recent: {}", recent.join(" | "))?;
    }
    if let Some(chase) = &card.chase {
        match chase.required_run_rate {
            Some(rate) if !chase.is_won() => {
                writeln!(out, "{} (RRR {})", chase.summary(), format_rate(rate))?
            }
            _ => writeln!(out, "{}", chase.summary())?,
        }
    }
    if let Some(digest) = &card.digest {
        writeln!(out, "Digest: {}", digest)?;
    }
    Ok(())
}
