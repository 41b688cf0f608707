//! Capture replay
//!
//! Feeds a recorded connection through a session and logs what the bot
//! would see: world changes, deaths and the safe headings after each frame.
//!
//! Capture format: repeated `[u32 LE length][frame bytes]`.
//!
//! Usage: `agario-replay <capture> [settings.json]`

use std::error::Error;
use std::{env, fs};

use agario_bot::bot::{self, edge_threats};
use agario_bot::consts::EAT_RATIO;
use agario_bot::{Arc, Ball, BotSettings, ClientCommand, Session, SessionEvent, WorldView, heading_vector};

/// How far ahead of the main ball the move target is placed
const STEER_DISTANCE: f32 = 500.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(capture) = args.next() else {
        return Err("usage: agario-replay <capture> [settings.json]".into());
    };
    let settings = match args.next() {
        Some(path) => BotSettings::load_from(path),
        None => BotSettings::default(),
    };

    let bytes = fs::read(&capture)?;
    log::info!("Replaying {} ({} bytes)", capture, bytes.len());

    let mut session = Session::new();
    for frame in frames(&bytes) {
        for event in session.receive(frame) {
            match event {
                SessionEvent::Ready | SessionEvent::Updated => {}
                SessionEvent::Died => log::info!("Died after {} frames", session.frames()),
                SessionEvent::Error(e) => log::debug!("Skipped frame: {}", e),
            }
        }
        steer(&session.world().snapshot(), &settings);
    }

    let world = session.world();
    log::info!(
        "Done: {} frames, {} balls visible, size {}, leaderboard {:?}",
        session.frames(),
        world.balls().len(),
        world.total_size(),
        world.leaderboard()
    );
    Ok(())
}

/// Split a capture into frames; a truncated trailing frame is dropped
fn frames(mut bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    std::iter::from_fn(move || {
        let (len, rest) = bytes.split_first_chunk::<4>()?;
        let len = u32::from_le_bytes(*len) as usize;
        if rest.len() < len {
            log::warn!("Truncated frame: wanted {} bytes, {} left", len, rest.len());
            bytes = &[];
            return None;
        }
        let (frame, rest) = rest.split_at(len);
        bytes = rest;
        Some(frame)
    })
}

/// Log the safe headings and the move command the bot would send
fn steer(view: &WorldView, settings: &BotSettings) {
    let Some(me) = view.main_ball() else {
        return;
    };

    let mut threats: Vec<Ball> = view
        .balls
        .values()
        .filter(|b| b.is_enemy() && b.can_eat(me))
        .cloned()
        .collect();
    if settings.avoid_map_edges {
        threats.extend(edge_threats(view));
    }

    let projection = settings.projection();
    // Anything big enough to split onto us gets a wider berth
    let scale = |ball: &Ball| {
        if f64::from(ball.size) >= f64::from(me.size) * EAT_RATIO * 2.0 {
            settings.threat_scale * 1.5
        } else {
            settings.threat_scale
        }
    };
    let Some(safe) = bot::find_safe_arcs_in_view(view, &threats, &projection, scale) else {
        return;
    };

    let Some(widest) = safe.iter().copied().max_by(|a, b| a.span.total_cmp(&b.span)) else {
        log::debug!("No safe heading among {} threats", threats.len());
        return;
    };
    let target = me.position_f32() + heading_vector(widest.mid()) * STEER_DISTANCE;
    let command = ClientCommand::MoveTo {
        x: target.x as i32,
        y: target.y as i32,
    };
    log::debug!(
        "{} threats, safe arcs {:?}, heading {:.1} -> {:?} ({} bytes)",
        threats.len(),
        safe.iter().map(|a: &Arc| (a.start, a.end())).collect::<Vec<_>>(),
        widest.mid(),
        command,
        command.encode().len()
    );
}
