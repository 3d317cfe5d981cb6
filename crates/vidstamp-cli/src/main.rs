mod args;

use anyhow::Result;
use args::{Command, Source};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use env_logger::Env;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    env,
    io::{Stdout, stdout},
    process,
    sync::mpsc::{self, Receiver},
};
use vidstamp_config::{Config, Theme, transcript_languages};
use vidstamp_engine::{
    PlayerCommand, Role, SeekDispatcher, SeekTarget, Segment, TargetKind, Timeline, VideoId,
    VideoUrlError, extract, io, parse_document,
    youtube::{self, GenerateRequest, VideoDetails},
};

/// Interface languages the viewer cycles through.
const LANGUAGES: [&str; 2] = ["th", "en"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Timeline,
    Text,
}

struct Palette {
    primary: Color,
    secondary: Color,
    highlight: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Pastel => Self {
                primary: Color::LightMagenta,
                secondary: Color::LightCyan,
                highlight: Color::LightYellow,
            },
            Theme::Dark => Self {
                primary: Color::Magenta,
                secondary: Color::Blue,
                highlight: Color::DarkGray,
            },
        }
    }

    fn role(&self, role: Role) -> Color {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
        }
    }
}

struct App {
    source: Source,
    video: Option<VideoId>,
    config: Config,
    timeline: Timeline,
    entry_state: ListState,
    view: View,
    dispatcher: SeekDispatcher,
    seek_events: Receiver<SeekTarget>,
    status: String,
}

impl App {
    fn new(source: Source, raw: &str, video: Option<VideoId>, config: Config) -> Self {
        let (tx, seek_events) = mpsc::channel();
        let mut dispatcher = SeekDispatcher::new();
        dispatcher.subscribe(move |target: &SeekTarget| {
            // Receiver is owned by the app and outlives the dispatcher
            let _ = tx.send(target.clone());
        });

        let mut app = Self {
            source,
            video,
            config,
            timeline: Timeline::default(),
            entry_state: ListState::default(),
            view: View::Timeline,
            dispatcher,
            seek_events,
            status: String::new(),
        };
        app.load(raw);

        if app.config.save_timestamps && app.video.is_some() {
            app.save();
        }

        app
    }

    fn load(&mut self, raw: &str) {
        self.timeline = Timeline::from_doc(&parse_document(raw));

        let selected = match self.timeline.len() {
            0 => None,
            len => Some(self.entry_state.selected().unwrap_or(0).min(len - 1)),
        };
        self.entry_state.select(selected);

        let format = if self.timeline.format.is_long() {
            "hh:mm:ss"
        } else {
            "mm:ss"
        };
        self.status = format!("{} entries ({format})", self.timeline.len());
    }

    fn reload(&mut self) {
        if self.source == Source::Stdin {
            self.status = "Cannot reload stdin".to_string();
            return;
        }
        match self.source.read() {
            Ok(raw) => {
                self.load(&raw);
                log::info!("Reloaded {}", self.source);
            }
            Err(e) => self.status = format!("Reload failed: {e}"),
        }
    }

    fn next_entry(&mut self) {
        if self.timeline.is_empty() {
            return;
        }
        let i = match self.entry_state.selected() {
            Some(i) => (i + 1) % self.timeline.len(),
            None => 0,
        };
        self.entry_state.select(Some(i));
    }

    fn previous_entry(&mut self) {
        if self.timeline.is_empty() {
            return;
        }
        let i = match self.entry_state.selected() {
            Some(0) | None => self.timeline.len() - 1,
            Some(i) => i - 1,
        };
        self.entry_state.select(Some(i));
    }

    fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Timeline => View::Text,
            View::Text => View::Timeline,
        };
    }

    fn seek(&mut self, kind: TargetKind) {
        let target = self
            .entry_state
            .selected()
            .and_then(|entry| self.timeline.seek_target(entry, kind));

        match target {
            Some(target) => self.dispatcher.dispatch(&target),
            None => {
                self.status = "No timestamp there".to_string();
                return;
            }
        }

        while let Ok(target) = self.seek_events.try_recv() {
            self.status = self.describe_seek(&target);
        }
    }

    fn describe_seek(&self, target: &SeekTarget) -> String {
        let command = match PlayerCommand::seek_to(target.seconds).to_json() {
            Ok(json) => json,
            Err(e) => return format!("Seek to {} failed: {e}", target.label),
        };
        match &self.video {
            Some(id) => format!(
                "Seek to {} {command} {}&t={}s",
                target.label,
                id.watch_url(),
                target.seconds
            ),
            None => format!("Seek to {} {command}", target.label),
        }
    }

    fn save(&mut self) {
        let Some(video) = &self.video else {
            self.status = "Saving needs --video <url-or-id>".to_string();
            return;
        };

        let text = self.timeline.to_text();
        self.status = match io::save_timestamps(&self.config.artifacts_dir, video, &text) {
            Ok(Some(path)) => format!("Saved {}", path.display()),
            Ok(None) => "Nothing to save".to_string(),
            Err(e) => format!("Save failed: {e}"),
        };
    }

    fn toggle_theme(&mut self) {
        let theme = self.config.toggle_theme();
        self.status = match self.config.save() {
            Ok(()) => format!("Theme: {}", theme.as_str()),
            Err(e) => format!("Theme: {} (not saved: {e})", theme.as_str()),
        };
    }

    fn cycle_language(&mut self) {
        let next = LANGUAGES
            .iter()
            .position(|l| *l == self.config.language)
            .map_or(LANGUAGES[0], |i| LANGUAGES[(i + 1) % LANGUAGES.len()]);
        self.config.set_language(next);
        self.status = match self.config.save() {
            Ok(()) => format!("Language: {}", self.config.language),
            Err(e) => format!("Language: {} (not saved: {e})", self.config.language),
        };
    }

    fn title(&self, view: &str) -> String {
        match &self.video {
            Some(id) => format!("{view}: {} [{id}]", self.source),
            None => format!("{view}: {}", self.source),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let command = match args::parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("Error: {message}");
            }
            eprintln!("{}", args::USAGE);
            process::exit(1);
        }
    };

    match command {
        Command::Html(source) => {
            let raw = source.read()?;
            println!("{}", Timeline::from_doc(&parse_document(&raw)).to_html());
            Ok(())
        }
        Command::Text(source) => {
            let raw = source.read()?;
            println!("{}", Timeline::from_doc(&parse_document(&raw)).to_text());
            Ok(())
        }
        Command::Video { input, details } => {
            let video = resolve_video(&input)?;
            let details: Option<VideoDetails> = match details {
                Some(path) => Some(serde_json::from_str(&io::read_text(&path)?)?),
                None => None,
            };
            let config = Config::load_or_default()?;
            println!(
                "{}",
                describe_video(&input, &video, details.as_ref(), &config.language)?
            );
            Ok(())
        }
        Command::View { source, video } => run_viewer(source, video),
    }
}

/// Video id from a link, falling back to a bare id or any `v=`/`youtu.be/` form.
fn resolve_video(input: &str) -> Result<VideoId, VideoUrlError> {
    match youtube::video_id_from_url(input.trim()) {
        Some(id) => Ok(id),
        None => youtube::extract_video_id(input),
    }
}

fn describe_video(
    input: &str,
    video: &VideoId,
    details: Option<&VideoDetails>,
    language: &str,
) -> Result<String> {
    let request = GenerateRequest {
        url: input.trim().to_string(),
        additional_instruction: String::new(),
        language: language.to_string(),
    };

    let mut lines = vec![
        format!("id:          {video}"),
        format!("watch:       {}", video.watch_url()),
        format!("embed:       {}", video.embed_url()),
        format!("oembed:      {}", video.oembed_url()),
    ];
    if let Some(details) = details {
        lines.push(format!("title:       {}", details.title));
        lines.push(format!(
            "author:      {} ({})",
            details.author_name, details.author_url
        ));
        lines.push(format!("thumbnail:   {}", details.thumbnail_url));
    }
    lines.push(format!(
        "transcripts: {}",
        transcript_languages(&request.language).join(", ")
    ));
    lines.push(format!("request:     {}", serde_json::to_string(&request)?));
    Ok(lines.join("\n"))
}

fn run_viewer(source: Source, video: Option<String>) -> Result<()> {
    let video = match video.as_deref().map(resolve_video).transpose() {
        Ok(video) => video,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };
    log::info!("Config path: {}", Config::config_path().display());

    let raw = match source.read() {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: Failed to read {source}: {e}");
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, &raw, video, config);

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_entry(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_entry(),
                KeyCode::Tab => app.toggle_view(),
                KeyCode::Enter => app.seek(TargetKind::Badge),
                KeyCode::Char(c @ '1'..='9') => {
                    let n = c as usize - '1' as usize;
                    app.seek(TargetKind::Inline(n));
                }
                KeyCode::Char('r') => app.reload(),
                KeyCode::Char('s') => app.save(),
                KeyCode::Char('t') => app.toggle_theme(),
                KeyCode::Char('l') => app.cycle_language(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let palette = Palette::for_theme(app.config.theme);

    match app.view {
        View::Timeline => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(rows[0]);
            render_entries(f, app, &palette, columns[0]);
            render_description(f, app, &palette, columns[1]);
        }
        View::Text => {
            let text = extract(&app.timeline.to_html());
            let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
            let content = Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(app.title("Text")),
                )
                .wrap(Wrap { trim: false });
            f.render_widget(content, rows[0]);
        }
    }

    let status = Paragraph::new(Line::from(Span::styled(
        app.status.clone(),
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    f.render_widget(status, rows[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Move | "),
        Span::raw("Enter: Seek | 1-9: Inline seek | "),
        Span::raw("Tab: Timeline/Text | r: Reload | s: Save | t: Theme | l: Language"),
    ]));
    f.render_widget(help, rows[2]);
}

fn render_entries(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let items: Vec<ListItem> = app
        .timeline
        .entries
        .iter()
        .map(|entry| {
            let mut lines = Vec::new();
            if let Some(role) = entry.separator_before {
                lines.push(Line::from(Span::styled(
                    "──",
                    Style::default().fg(palette.role(role)),
                )));
            }
            let summary = entry.description_text();
            let summary = summary.lines().next().unwrap_or_default().to_string();
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", entry.badge.label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(palette.role(entry.accent)),
                ),
                Span::raw(" "),
                Span::raw(summary),
            ]));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.title("Timeline")),
        )
        .highlight_style(Style::default().bg(palette.highlight).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.entry_state);
}

fn render_description(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let entry = app
        .entry_state
        .selected()
        .and_then(|i| app.timeline.entries.get(i));

    let lines = match entry {
        None => vec![Line::from("No timestamps")],
        Some(entry) => {
            let accent = Style::default()
                .fg(palette.role(entry.accent))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            let mut lines = Vec::new();
            let mut current = Vec::new();
            let mut inline_index = 0;
            for segment in &entry.description {
                match segment {
                    Segment::Text(text) => current.push(Span::raw(text.clone())),
                    Segment::LineBreak => lines.push(Line::from(std::mem::take(&mut current))),
                    Segment::Timestamp(label) => {
                        inline_index += 1;
                        let text = if inline_index <= 9 {
                            format!("{}[{inline_index}]", label.label)
                        } else {
                            label.label.clone()
                        };
                        current.push(Span::styled(text, accent));
                    }
                }
            }
            lines.push(Line::from(current));
            lines
        }
    };

    let title = match entry {
        Some(entry) => format!("{} ({}s)", entry.badge.label, entry.badge.seconds),
        None => "Description".to_string(),
    };
    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    f.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app(raw: &str, video: Option<&str>) -> App {
        let video = video.map(|v| youtube::extract_video_id(v).unwrap());
        App::new(
            Source::File("notes.txt".into()),
            raw,
            video,
            Config::default(),
        )
    }

    #[test]
    fn selection_wraps_around() {
        let mut app = app("0:00 a\n0:10 b\n0:20 c", None);
        assert_eq!(app.entry_state.selected(), Some(0));
        app.previous_entry();
        assert_eq!(app.entry_state.selected(), Some(2));
        app.next_entry();
        assert_eq!(app.entry_state.selected(), Some(0));
    }

    #[test]
    fn empty_timeline_has_no_selection() {
        let mut app = app("", None);
        app.next_entry();
        assert_eq!(app.entry_state.selected(), None);
        app.seek(TargetKind::Badge);
        assert_eq!(app.status, "No timestamp there");
    }

    #[test]
    fn seek_reports_player_command() {
        let mut app = app("0:10 see 2:15", None);
        app.seek(TargetKind::Inline(0));
        assert_eq!(
            app.status,
            r#"Seek to 02:15 {"event":"command","func":"seekTo","args":[135,true]}"#
        );
    }

    #[test]
    fn seek_includes_watch_link_for_video() {
        let mut app = app("1:00 start", Some("dQw4w9WgXcQ"));
        app.seek(TargetKind::Badge);
        assert!(app.status.ends_with("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=60s"));
    }

    #[test]
    fn save_without_video_is_refused() {
        let mut app = app("0:00 a", None);
        app.save();
        assert_eq!(app.status, "Saving needs --video <url-or-id>");
    }

    #[test]
    fn save_writes_artifact() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app("0:00 a\n1:02:03 b", Some("dQw4w9WgXcQ"));
        app.config.artifacts_dir = dir.path().to_path_buf();

        app.save();

        let saved = io::load_timestamps(dir.path(), app.video.as_ref().unwrap()).unwrap();
        assert_eq!(saved, "00:00:00 a\n01:02:03 b");
        assert!(app.status.starts_with("Saved "));
    }

    #[test]
    fn load_keeps_selection_in_range() {
        let mut app = app("0:00 a\n0:10 b\n0:20 c", None);
        app.entry_state.select(Some(2));
        app.load("0:00 only");
        assert_eq!(app.entry_state.selected(), Some(0));
        assert_eq!(app.status, "1 entries (mm:ss)");
    }

    #[test]
    fn video_links_and_bare_ids_resolve() {
        for input in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            " dQw4w9WgXcQ ",
        ] {
            assert_eq!(resolve_video(input).unwrap().as_str(), "dQw4w9WgXcQ");
        }
        assert!(resolve_video("https://vimeo.com/1").is_err());
    }

    #[test]
    fn video_description_lists_urls_and_request() {
        let video = resolve_video("dQw4w9WgXcQ").unwrap();
        let details = VideoDetails {
            title: "Never Gonna Give You Up".to_string(),
            author_name: "Rick Astley".to_string(),
            author_url: "https://www.youtube.com/@RickAstleyYT".to_string(),
            thumbnail_url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
        };

        let text = describe_video("dQw4w9WgXcQ", &video, Some(&details), "auto").unwrap();

        assert!(text.contains("embed:       https://www.youtube.com/embed/dQw4w9WgXcQ?enablejsapi=1"));
        assert!(text.contains("oembed:      https://www.youtube.com/oembed?url="));
        assert!(text.contains("title:       Never Gonna Give You Up"));
        assert!(text.contains("transcripts: th"));
        assert!(text.ends_with(
            r#"request:     {"url":"dQw4w9WgXcQ","additional_instruction":"","language":"auto"}"#
        ));
    }

    #[test]
    fn video_description_without_details() {
        let video = resolve_video("dQw4w9WgXcQ").unwrap();
        let text = describe_video("dQw4w9WgXcQ", &video, None, "EN").unwrap();
        assert!(!text.contains("title:"));
        assert!(text.contains("transcripts: en"));
    }

    #[test]
    fn tab_switches_views() {
        let mut app = app("0:00 a", None);
        app.toggle_view();
        assert_eq!(app.view, View::Text);
        app.toggle_view();
        assert_eq!(app.view, View::Timeline);
    }
}
