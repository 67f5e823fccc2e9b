//! Line-oriented command stream driving the shell.

use folio_core::ContentKey;
use folio_core::Desktop;
use folio_core::error::{FolioError, Result};
use folio_core::input::InputEvent;
use folio_core::storage::NewCertification;
use folio_core::wm::WindowId;

pub const HELP: &[&str] = &[
    "open <key>            open or focus a window (about, vscode, excel, ...)",
    "down|move|up|click|dbl <x> <y>   pointer input",
    "close|min|restore|focus|max <w>  window operations by id",
    "task <n> | taskclose <n>         taskbar entry click / close",
    "start | menu <n> | search <text> start menu",
    "tile <n>              click a sidebar stat tile",
    "tick <ms>             advance timers",
    "name <text> | enter | skip       welcome screen",
    "cert list | cert add name|issuer[|skills[|description]] | cert del <id>",
    "photo <data-url> | photo clear",
    "show | help | quit",
];

/// One parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(ContentKey),
    Input(InputEvent),
    Close(WindowId),
    Minimize(WindowId),
    Restore(WindowId),
    Focus(WindowId),
    Maximize(WindowId),
    Task(usize),
    TaskClose(usize),
    Start,
    Menu(usize),
    Search(String),
    Tile(usize),
    Tick(u32),
    Name(String),
    Enter,
    Skip,
    CertList,
    CertAdd(NewCertification),
    CertDelete(String),
    Photo(Option<String>),
    Show,
    Help,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let cmd = match verb {
        "open" => Command::Open(rest.parse()?),
        "down" | "move" | "up" | "click" | "dbl" => {
            let (x, y) = parse_point(rest)?;
            Command::Input(match verb {
                "down" => InputEvent::PointerDown { x, y },
                "move" => InputEvent::PointerMove { x, y },
                "up" => InputEvent::PointerUp { x, y },
                "click" => InputEvent::Click { x, y },
                _ => InputEvent::DoubleClick { x, y },
            })
        },
        "close" => Command::Close(parse_window(rest)?),
        "min" => Command::Minimize(parse_window(rest)?),
        "restore" => Command::Restore(parse_window(rest)?),
        "focus" => Command::Focus(parse_window(rest)?),
        "max" => Command::Maximize(parse_window(rest)?),
        "task" => Command::Task(parse_num(rest)?),
        "taskclose" => Command::TaskClose(parse_num(rest)?),
        "start" => Command::Start,
        "menu" => Command::Menu(parse_num(rest)?),
        "search" => Command::Search(rest.to_string()),
        "tile" => Command::Tile(parse_num(rest)?),
        "tick" => Command::Tick(parse_num(rest)?),
        "name" => Command::Name(rest.to_string()),
        "enter" => Command::Enter,
        "skip" => Command::Skip,
        "cert" => parse_cert(rest)?,
        "photo" => match rest {
            "" => return Err(FolioError::Command("usage: photo <data-url> | photo clear".into())),
            "clear" => Command::Photo(None),
            url => Command::Photo(Some(url.to_string())),
        },
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Input(InputEvent::Quit),
        other => return Err(FolioError::Command(format!("unknown command: {other}"))),
    };
    Ok(Some(cmd))
}

fn parse_num<T: std::str::FromStr>(text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| FolioError::Command(format!("expected a number, got '{text}'")))
}

fn parse_point(text: &str) -> Result<(i32, i32)> {
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(x), Some(y), None) => Ok((parse_num(x)?, parse_num(y)?)),
        _ => Err(FolioError::Command(format!("expected '<x> <y>', got '{text}'"))),
    }
}

fn parse_window(text: &str) -> Result<WindowId> {
    text.parse()
        .map_err(|_| FolioError::Command(format!("expected a window id like w1, got '{text}'")))
}

fn parse_cert(text: &str) -> Result<Command> {
    let (sub, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    match sub {
        "list" => Ok(Command::CertList),
        "del" => {
            let id = rest.trim();
            if id.is_empty() {
                return Err(FolioError::Command("usage: cert del <id>".into()));
            }
            Ok(Command::CertDelete(id.to_string()))
        },
        "add" => {
            let mut fields = rest.split('|').map(str::trim);
            let name = fields.next().unwrap_or_default().to_string();
            let issuer = fields.next().unwrap_or_default().to_string();
            if name.is_empty() || issuer.is_empty() {
                return Err(FolioError::Command("cert add needs name|issuer".into()));
            }
            Ok(Command::CertAdd(NewCertification {
                name,
                issuer,
                skills: fields.next().unwrap_or_default().to_string(),
                description: fields.next().unwrap_or_default().to_string(),
                image_url: None,
            }))
        },
        _ => Err(FolioError::Command("usage: cert list|add|del".into())),
    }
}

/// Apply a command. Returns any lines to print before the scene.
pub fn execute(desktop: &mut Desktop, cmd: Command) -> Vec<String> {
    let mut out = Vec::new();
    match cmd {
        Command::Open(key) => {
            let id = desktop.open_labelled(key, key.slug());
            out.push(format!("opened {id}"));
        },
        Command::Input(event) => {
            desktop.handle_input(event);
        },
        Command::Close(id) => desktop.close_window(id),
        Command::Minimize(id) => desktop.minimize_window(id),
        Command::Restore(id) => desktop.restore_window(id),
        Command::Focus(id) => desktop.focus_window(id),
        Command::Maximize(id) => desktop.toggle_maximize(id),
        Command::Task(n) => {
            if !desktop.taskbar_click(n) {
                out.push(format!("no taskbar entry {n}"));
            }
        },
        Command::TaskClose(n) => {
            if !desktop.taskbar_close(n) {
                out.push(format!("no taskbar entry {n}"));
            }
        },
        Command::Start => desktop.toggle_start_menu(),
        Command::Menu(n) => {
            if desktop.start_menu_activate(n).is_none() && desktop.is_running() {
                out.push(format!("no menu item {n} (is the menu open?)"));
            }
        },
        Command::Search(query) => desktop.set_start_menu_query(&query),
        Command::Tile(n) => {
            if desktop.click_tile(n).is_none() {
                out.push(format!("no tile {n}"));
            }
        },
        Command::Tick(ms) => {
            let fired = desktop.tick(ms);
            log::debug!("{} timer(s) fired", fired.len());
        },
        Command::Name(name) => {
            if !desktop.submit_name(&name) {
                out.push("name not accepted".to_string());
            }
        },
        Command::Enter => {
            if !desktop.enter() {
                out.push("not ready to enter".to_string());
            }
        },
        Command::Skip => desktop.skip_welcome(),
        Command::CertList => {
            for cert in desktop.certifications() {
                out.push(format!("{}  {} ({})", cert.id, cert.name, cert.issuer));
            }
        },
        Command::CertAdd(input) => match desktop.add_certification(input) {
            Some(cert) => out.push(format!("added {}", cert.id)),
            None => out.push("certification rejected".to_string()),
        },
        Command::CertDelete(id) => {
            if !desktop.delete_certification(&id) {
                out.push(format!("no certification {id}"));
            }
        },
        Command::Photo(url) => desktop.set_profile_image(url),
        Command::Show => {},
        Command::Help => out.extend(HELP.iter().map(|l| (*l).to_string())),
    }
    out
}
