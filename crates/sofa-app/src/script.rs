//! Line commands that stand in for the remote and the platform's media and
//! document events.
//!
//! ```text
//! key 40              raw remote key code
//! down | ok | back    named remote signal
//! type <text>         replace the address field text
//! submit [text]       submit the address field (or <text>)
//! links a.mp4 sub/    the frame serves a listing with these links
//! opaque              the frame serves a cross-origin document
//! loaded              the frame finished loading
//! metadata 120.5      media duration is known
//! time 42             playback position advanced
//! play | pause | blur media and focus events
//! status              print the current state
//! quit
//! ```

use anyhow::{Context, Result, bail};
use sofa_core::Session;
use sofa_core::address::Address;
use sofa_core::event::SurfaceEvent;
use sofa_core::input::Signal;
use sofa_core::platform::services::{
    DisplayService, EmbeddedService, FocusService, MediaService,
};
use sofa_core::platform::store::KeyValueStore;
use sofa_core::platform::{DesktopShell, FrameContent};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Key(u32),
    Signal(Signal),
    Type(String),
    Submit(Option<String>),
    Serve(FrameContent),
    Loaded,
    Metadata(f64),
    Time(f64),
    Play,
    Pause,
    Blur,
    Status,
    Quit,
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "key" => Command::Key(
            rest.parse()
                .with_context(|| format!("bad key code {rest:?}"))?,
        ),
        "type" => Command::Type(rest.to_string()),
        "submit" => Command::Submit((!rest.is_empty()).then(|| rest.to_string())),
        "links" => Command::Serve(FrameContent::Listing(
            rest.split_whitespace().map(str::to_string).collect(),
        )),
        "opaque" => Command::Serve(FrameContent::Opaque),
        "loaded" => Command::Loaded,
        "metadata" => Command::Metadata(parse_seconds(rest)?),
        "time" => Command::Time(parse_seconds(rest)?),
        "play" => Command::Play,
        "pause" => Command::Pause,
        "blur" => Command::Blur,
        "status" => Command::Status,
        "quit" | "exit" => Command::Quit,
        other => match Signal::from_name(other) {
            Some(signal) => Command::Signal(signal),
            None => bail!("unknown command {other:?}"),
        },
    };
    Ok(Some(command))
}

fn parse_seconds(text: &str) -> Result<f64> {
    if text.eq_ignore_ascii_case("inf") {
        return Ok(f64::INFINITY);
    }
    text.parse()
        .with_context(|| format!("bad number of seconds {text:?}"))
}

/// Run one command, then deliver whatever the shell raised while it ran.
/// Returns `false` when the session should end.
pub fn apply<S: KeyValueStore>(session: &mut Session<DesktopShell, S>, command: Command) -> bool {
    if command == Command::Quit {
        return false;
    }
    execute(session, command);
    follow_link(session);
    for event in session.shell_mut().take_events() {
        log::debug!("Shell raised {event:?}");
        session.handle_event(event);
    }
    true
}

fn execute<S: KeyValueStore>(session: &mut Session<DesktopShell, S>, command: Command) {
    match command {
        Command::Key(code) => {
            if let Some(outcome) = session.handle_key(code) {
                log::info!("key {code} -> {outcome:?}");
            }
        },
        Command::Signal(signal) => {
            let outcome = session.handle_signal(signal);
            log::info!("{signal:?} -> {outcome:?}");
        },
        Command::Type(text) => {
            if let Err(e) = session.shell_mut().set_address_text(&text) {
                log::warn!("Cannot type: {e}");
            }
        },
        Command::Submit(text) => {
            let text = text.unwrap_or_else(|| session.shell().address_text());
            session.submit_address(&text);
        },
        Command::Serve(content) => session.shell_mut().set_frame_content(content),
        Command::Loaded => {
            let address = session.shell().frame_address().to_string();
            session.handle_event(SurfaceEvent::LoadCompleted { address });
        },
        Command::Metadata(duration) => match media_address(session) {
            Some(address) => {
                session.handle_event(SurfaceEvent::MetadataReady { address, duration });
            },
            None => log::warn!("No media loaded"),
        },
        Command::Time(offset) => match media_address(session) {
            Some(address) => {
                if let Err(e) = session.shell_mut().seek(offset) {
                    log::warn!("Cannot move playback: {e}");
                }
                session.handle_event(SurfaceEvent::TimeAdvanced { address, offset });
            },
            None => log::warn!("No media loaded"),
        },
        Command::Play => {
            if let Err(e) = session.shell_mut().play() {
                log::warn!("Cannot play: {e}");
            }
        },
        Command::Pause => {
            if let Err(e) = session.shell_mut().pause() {
                log::warn!("Cannot pause: {e}");
            }
        },
        Command::Blur => session.handle_event(SurfaceEvent::VideoFocusLost),
        Command::Status => println!("{}", status(session)),
        Command::Quit => {},
    }
}

/// Navigate the frame to a link the listing followed. The page's `loaded`
/// event comes later, as it would from a real frame.
fn follow_link<S: KeyValueStore>(session: &mut Session<DesktopShell, S>) {
    let Some(href) = session.shell_mut().take_followed_link() else {
        return;
    };
    let target = Address::parse(session.shell().frame_address())
        .and_then(|base| base.resolve(&href));
    let Some(target) = target else {
        log::warn!("Cannot follow {href:?} from {:?}", session.shell().frame_address());
        return;
    };
    if let Err(e) = session.shell_mut().navigate(&target.to_string()) {
        log::warn!("Cannot follow {target}: {e}");
    }
}

fn media_address<S: KeyValueStore>(session: &Session<DesktopShell, S>) -> Option<String> {
    session.shell().media_source().map(str::to_string)
}

/// One-line summary of the session state.
pub fn status<S: KeyValueStore>(session: &Session<DesktopShell, S>) -> String {
    let shell = session.shell();
    let state = session.coordinator().state();
    let focused = shell
        .focused()
        .map_or_else(|| "-".to_string(), |t| t.to_string());
    format!(
        "active={} content={} playing={} paused={} immersive={} focus={} address={:?} \
         editing={} media={:?} position={} frame={:?} document={:?} notice={:?}",
        state.active,
        state.content,
        state.media_playing,
        shell.is_paused(),
        state.immersive,
        focused,
        shell.address_text(),
        shell.is_editing(),
        shell.media_source().unwrap_or("-"),
        shell.position(),
        shell.frame_address(),
        session.coordinator().subdocument(),
        shell.notices().last().map_or("-", String::as_str),
    )
}
