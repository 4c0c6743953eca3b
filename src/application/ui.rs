use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Banner;
use crate::domain::models::Event;
use crate::domain::models::TextArea;
use crate::domain::models::Tone;
use crate::domain::services::actions::help_text;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

/// Tallest the citation panel is allowed to grow before it scrolls off.
const MAX_CITATION_HEIGHT: u16 = 12;

fn tone_style(tone: Option<Tone>) -> Style {
    let colour = match tone {
        Some(Tone::Pending) => Color::Yellow,
        Some(Tone::Info) => Color::Blue,
        Some(Tone::Success) => Color::Green,
        Some(Tone::Failure) => Color::Red,
        None => Color::Reset,
    };

    return Style::default().fg(colour);
}

fn banner_line(banner: &Banner) -> Line<'static> {
    return Line::from(Span::styled(banner.text.to_string(), tone_style(banner.tone)));
}

fn rounded_block(title: &str) -> Block<'_> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title);
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    return Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1];
}

fn index_lines(app_state: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("Path: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(app_state.project_path.to_string()),
    ])];

    lines.extend(
        app_state
            .predefined_paths
            .iter()
            .enumerate()
            .map(|(idx, path)| return Line::from(format!("  ({}) {path}", idx + 1))),
    );

    if !app_state.index_banner.is_empty() {
        lines.push(banner_line(&app_state.index_banner));
    }

    return lines;
}

fn citation_lines(app_state: &AppState) -> Vec<Line<'static>> {
    return app_state
        .citations
        .iter()
        .enumerate()
        .flat_map(|(idx, citation)| {
            let mut lines = vec![];
            if idx > 0 {
                lines.push(Line::from(""));
            }
            lines.extend(citation.as_lines().into_iter().map(Line::from));

            return lines;
        })
        .collect();
}

fn status_line(app_state: &AppState) -> Line<'static> {
    let mut llm_type = app_state.llm_type.to_string();
    if llm_type.is_empty() {
        llm_type = "server default".to_string();
    }

    let mut rerank = "off";
    if app_state.rerank_enable {
        rerank = "on";
    }

    return Line::from(Span::styled(
        format!("LLM: {llm_type} | Rerank: {rerank} | /help for commands"),
        Style::default().fg(Color::DarkGray),
    ));
}

fn render_settings<B: Backend>(frame: &mut Frame<B>, app_state: &AppState) {
    let rect = centered_rect(70, 60, frame.size());
    let focused = app_state.settings.focused();

    let mut lines = app_state
        .settings
        .rows()
        .into_iter()
        .map(|(field, value)| {
            let mut style = Style::default();
            if field == focused {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let mut hint = "";
            if field.is_slider() {
                hint = " (←/→)";
            }

            return Line::from(vec![
                Span::styled(format!("{:<18}", field.label()), style),
                Span::raw(format!(" {value}{hint}")),
            ]);
        })
        .collect::<Vec<Line>>();

    lines.push(Line::from(""));
    lines.push(banner_line(&app_state.settings.status));
    lines.push(Line::from(Span::styled(
        "Enter to save, Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(rounded_block("Settings")),
        rect,
    );
}

fn render_help<B: Backend>(frame: &mut Frame<B>) {
    let rect = centered_rect(80, 80, frame.size());

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(help_text())
            .wrap(Wrap { trim: false })
            .block(rounded_block("Help (Esc to close)")),
        rect,
    );
}

fn render<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &mut AppState,
    textarea: &tui_textarea::TextArea,
) {
    let index = index_lines(app_state);
    let citations = citation_lines(app_state);

    let index_height = u16::try_from(index.len()).unwrap_or(u16::MAX).saturating_add(2);
    let mut citations_height = 0;
    if app_state.show_citations() {
        citations_height = u16::try_from(citations.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(MAX_CITATION_HEIGHT);
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(index_height),
            Constraint::Min(3),
            Constraint::Length(citations_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Max(4),
        ])
        .split(frame.size());

    if layout[1].width != app_state.last_known_width
        || layout[1].height != app_state.last_known_height
    {
        app_state.set_rect(layout[1]);
    }

    frame.render_widget(
        Paragraph::new(index).block(rounded_block("Index")),
        layout[0],
    );
    app_state.transcript.render(frame, layout[1]);

    if app_state.show_citations() {
        frame.render_widget(
            Paragraph::new(citations)
                .wrap(Wrap { trim: false })
                .block(rounded_block("Sources")),
            layout[2],
        );
    }

    frame.render_widget(
        Paragraph::new(banner_line(&app_state.answer_banner)),
        layout[3],
    );
    frame.render_widget(Paragraph::new(status_line(app_state)), layout[4]);
    frame.render_widget(textarea.widget(), layout[5]);

    if app_state.settings_open {
        render_settings(frame, app_state);
    } else if app_state.help_open {
        render_help(frame);
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut events = EventsService::new(rx);

    tx.send(Action::BackendBootstrap())?;

    loop {
        terminal.draw(|frame| render(frame, app_state, &textarea))?;

        match events.next().await? {
            Event::BackendReady(snapshot) => {
                app_state.handle_backend_ready(snapshot);
            }
            Event::BackendUnavailable(err) => {
                tracing::warn!(error = %err, "Start-up configuration request failed");
                app_state.handle_backend_unavailable(&err);
            }
            Event::ConfigLoaded(snapshot) => {
                app_state.handle_config_loaded(snapshot);
            }
            Event::ConfigLoadFailed(err) => {
                app_state.handle_config_load_failure(&err);
            }
            Event::ConfigSaved(res) => {
                app_state.handle_config_saved(res);
            }
            Event::ConfigSaveFailed(err) => {
                app_state.handle_config_save_failure(&err);
            }
            Event::IndexResponse(res) => {
                app_state.handle_index_response(res);
            }
            Event::IndexFailed(err) => {
                app_state.handle_index_failure(&err);
            }
            Event::QueryResponse(res) => {
                app_state.handle_query_response(res);
            }
            Event::QueryFailed(err) => {
                app_state.handle_query_failure(&err);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                if app_state.settings_open {
                    tx.send(app_state.save_settings())?;
                    continue;
                }
                if app_state.help_open {
                    app_state.help_open = false;
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                textarea = TextArea::default();
                if app_state.handle_input(&input_str, &tx)? {
                    break;
                }
            }
            Event::KeyboardCharInput(input) => {
                if app_state.settings_open {
                    app_state.handle_settings_input(input);
                } else if app_state.help_open {
                    if let Input { key: Key::Esc, .. } = input {
                        app_state.help_open = false;
                    }
                } else {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if let Some(pasted) = app_state.handle_paste(&text) {
                    for c in pasted.chars() {
                        textarea.insert_char(c);
                    }
                }
            }
            Event::UIScrollUp() => {
                if app_state.settings_open {
                    app_state.settings.focus_prev();
                } else {
                    app_state.transcript.up();
                }
            }
            Event::UIScrollDown() => {
                if app_state.settings_open {
                    app_state.settings.focus_next();
                } else {
                    app_state.transcript.down();
                }
            }
            Event::UIScrollPageUp() => {
                app_state.transcript.up_page();
            }
            Event::UIScrollPageDown() => {
                app_state.transcript.down_page();
            }
            Event::UITick() => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    // Best effort, the terminal may never have been set up.
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    );
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(
        &Config::get(ConfigKey::LlmType),
        Config::get_bool(ConfigKey::Rerank),
    );

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
