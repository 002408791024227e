use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use maskedinput_config::Config;
use maskedinput_control::{
    ChangeEvent, CharacterInput, Key, KeyDown, MaskedInput, MaskedInputProps, Modifiers,
    NativeEvent, Paste, Propagation, TextControl,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    cell::RefCell,
    env,
    fs::File,
    io::{Stdout, stdout},
    process,
    rc::Rc,
};

mod terminal_control;

use terminal_control::TerminalControl;

enum Flow {
    Continue,
    Submit,
    Quit,
}

struct App {
    title: String,
    input: MaskedInput<TerminalControl>,
    last_change: Rc<RefCell<Option<ChangeEvent>>>,
}

impl App {
    fn new(title: String, props: MaskedInputProps) -> Result<Self> {
        let last_change = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last_change);

        let mut input = MaskedInput::mount(TerminalControl::new(), props)?
            .with_on_change(move |event: &ChangeEvent| {
                log::info!("{:?}: {:?}", event.cause, event.value);
                *sink.borrow_mut() = Some(event.clone());
            });
        input.focus()?;

        Ok(Self {
            title,
            input,
            last_change,
        })
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let modifiers = to_modifiers(key.modifiers);
        let shift = modifiers.contains(Modifiers::SHIFT);
        let command = modifiers.contains(Modifiers::CTRL);

        if key.code == KeyCode::Esc {
            return Flow::Quit;
        }

        let key_down = KeyDown::new(to_key(key.code), modifiers);
        if self.input.dispatch(NativeEvent::KeyDown(key_down)) == Propagation::PreventDefault {
            return Flow::Continue;
        }

        // Whatever the controller let through is ours to perform
        match key.code {
            KeyCode::Enter => {
                let press = NativeEvent::KeyPress(CharacterInput::enter());
                if self.input.dispatch(press) == Propagation::Continue {
                    return Flow::Submit;
                }
            }
            KeyCode::Left => self.input.control_mut().move_left(shift),
            KeyCode::Right => self.input.control_mut().move_right(shift),
            KeyCode::Home => self.input.control_mut().move_to(0, shift),
            KeyCode::End => {
                let end = self.input.control().len();
                self.input.control_mut().move_to(end, shift);
            }
            KeyCode::Delete => {
                if self.input.control_mut().delete_forward() {
                    self.input.dispatch(NativeEvent::Change);
                }
            }
            KeyCode::Char('a') if command => self.input.control_mut().select_all(),
            KeyCode::Char('c') if command => self.input.control_mut().copy(),
            KeyCode::Char('x') if command => {
                if self.input.control_mut().cut() {
                    self.input.dispatch(NativeEvent::Change);
                }
            }
            KeyCode::Char('v') if command => {
                let text = self.input.control().clipboard().to_string();
                self.input.dispatch(NativeEvent::Paste(Paste::new(text)));
            }
            KeyCode::Char(c) => {
                let press = CharacterInput::key_press(c).with_modifiers(modifiers);
                self.input.dispatch(NativeEvent::KeyPress(press));
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_paste(&mut self, text: String) {
        self.input.dispatch(NativeEvent::Paste(Paste::new(text)));
    }

    fn submitted_value(&self) -> String {
        self.input.control().value()
    }
}

fn to_modifiers(modifiers: KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::empty();
    mapped.set(Modifiers::SHIFT, modifiers.contains(KeyModifiers::SHIFT));
    mapped.set(Modifiers::ALT, modifiers.contains(KeyModifiers::ALT));
    mapped.set(Modifiers::CTRL, modifiers.contains(KeyModifiers::CONTROL));
    mapped.set(
        Modifiers::META,
        modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    );
    mapped
}

fn to_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        other => Key::Named(format!("{other:?}")),
    }
}

/// Where the field definition comes from.
#[derive(Debug, PartialEq)]
enum FieldSource {
    Config(String),
    Inline { mask: String, value: String },
}

fn parse_args(args: &[String]) -> Option<FieldSource> {
    match args {
        [_, name] if !name.starts_with("--") => Some(FieldSource::Config(name.clone())),
        [_, flag, mask] if flag == "--mask" => Some(FieldSource::Inline {
            mask: mask.clone(),
            value: String::new(),
        }),
        [_, flag, mask, value_flag, value] if flag == "--mask" && value_flag == "--value" => {
            Some(FieldSource::Inline {
                mask: mask.clone(),
                value: value.clone(),
            })
        }
        _ => None,
    }
}

fn resolve_field(source: FieldSource) -> Result<(String, MaskedInputProps)> {
    match source {
        FieldSource::Inline { mask, value } => {
            Ok((mask.clone(), MaskedInputProps::new(mask).with_value(value)))
        }
        FieldSource::Config(name) => {
            let config_path = Config::config_path();
            let config = Config::load()?.with_context(|| {
                format!("No config file found at {}", config_path.display())
            })?;
            let field = config.field(&name).with_context(|| {
                format!(
                    "Field '{name}' is not defined in {}",
                    config_path.display()
                )
            })?;
            Ok((name.clone(), field.props()?))
        }
    }
}

/// Send log output to a file; stderr would draw over the UI.
fn init_logging() {
    let log_path = env::temp_dir().join("maskedinput-cli.log");
    match File::create(&log_path) {
        Ok(file) => {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
            log::info!("logging to {}", log_path.display());
        }
        Err(e) => eprintln!("Warning: logging disabled, cannot create {}: {e}", log_path.display()),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let Some(source) = parse_args(&args) else {
        eprintln!("Usage: {} <field-name>", args[0]);
        eprintln!("       {} --mask <pattern> [--value <value>]", args[0]);
        eprintln!("Fields are read from {}", Config::config_path().display());
        process::exit(1);
    };

    let (title, props) = match resolve_field(source) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    init_logging();
    let mut app = App::new(title, props)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    match res {
        Ok(Some(value)) => println!("{value}"),
        Ok(None) => {}
        Err(err) => println!("{err:?}"),
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<Option<String>> {
    loop {
        // One loop iteration is one tick of the host
        app.input.run_deferred();
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match app.handle_key(key) {
                Flow::Continue => {}
                Flow::Submit => return Ok(Some(app.submitted_value())),
                Flow::Quit => return Ok(None),
            },
            Event::Paste(text) => app.handle_paste(text),
            _ => {}
        }
    }
}

/// Columns for a field of `size` characters plus its border.
fn bordered_width(size: usize) -> u16 {
    u16::try_from(size).unwrap_or(u16::MAX).saturating_add(2)
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let attributes = app.input.attributes();
    let control = app.input.control();

    let field_line = if attributes.value.is_empty() {
        Line::from(Span::styled(
            attributes.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let selection = control.selection();
        let spans: Vec<Span> = attributes
            .value
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let style = if i >= selection.start && i < selection.end {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Span::styled(c.to_string(), style)
            })
            .collect();
        Line::from(spans)
    };

    let field_width = bordered_width(attributes.size).min(chunks[0].width);
    let field_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(field_width), Constraint::Min(0)])
        .split(chunks[0])[0];

    let field = Paragraph::new(field_line)
        .block(Block::default().borders(Borders::ALL).title(app.title.as_str()));
    f.render_widget(field, field_area);

    if control.is_focused() {
        let column = control.head().min(attributes.size) as u16;
        f.set_cursor_position((field_area.x + 1 + column, field_area.y + 1));
    }

    let status = match app.last_change.borrow().as_ref() {
        Some(change) => format!("{:?} -> {:?}", change.cause, change.value),
        None => format!("max length {}", attributes.max_length),
    };
    let status = Paragraph::new(status)
        .block(Block::default().borders(Borders::ALL).title("Last change"));
    f.render_widget(status, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("Enter: Submit | Esc: Quit | "),
        Span::raw("Ctrl+Z/Y: Undo/Redo | "),
        Span::raw("Ctrl+C/X/V: Copy/Cut/Paste"),
    ]));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bordered_width_saturates() {
        assert_eq!(bordered_width(14), 16);
        assert_eq!(bordered_width(65534), u16::MAX);
        assert_eq!(bordered_width(1_000_000), u16::MAX);
    }

    #[test]
    fn parses_field_name() {
        assert_eq!(
            parse_args(&args(&["maskedinput-cli", "phone"])),
            Some(FieldSource::Config("phone".to_string()))
        );
    }

    #[test]
    fn parses_inline_mask_with_value() {
        assert_eq!(
            parse_args(&args(&["maskedinput-cli", "--mask", "11/11", "--value", "1224"])),
            Some(FieldSource::Inline {
                mask: "11/11".to_string(),
                value: "1224".to_string(),
            })
        );
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert_eq!(parse_args(&args(&["maskedinput-cli"])), None);
        assert_eq!(parse_args(&args(&["maskedinput-cli", "--value", "1"])), None);
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn app() -> App {
        App::new(
            "phone".to_string(),
            MaskedInputProps::new("(999) 999-9999"),
        )
        .unwrap()
    }

    #[test]
    fn typing_and_forward_delete() {
        let mut app = app();
        for c in "5551234567".chars() {
            app.handle_key(press(KeyCode::Char(c), KeyModifiers::NONE));
        }
        assert_eq!(app.submitted_value(), "(555) 123-4567");

        app.handle_key(press(KeyCode::Home, KeyModifiers::NONE));
        for _ in 0..6 {
            app.handle_key(press(KeyCode::Right, KeyModifiers::NONE));
        }
        app.handle_key(press(KeyCode::Delete, KeyModifiers::NONE));

        assert_eq!(app.submitted_value(), "(555) 23_-4567");
    }

    #[test]
    fn cut_and_paste_through_the_clipboard() {
        let mut app = app();
        app.handle_paste("5551234567".to_string());
        app.input.run_deferred();

        app.handle_key(press(KeyCode::Char('a'), KeyModifiers::CONTROL));
        app.handle_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(app.submitted_value(), "");

        app.handle_key(press(KeyCode::Char('v'), KeyModifiers::CONTROL));
        assert_eq!(app.submitted_value(), "(555) 123-4567");
    }

    #[test]
    fn enter_submits_and_escape_quits() {
        let mut app = app();
        assert!(matches!(
            app.handle_key(press(KeyCode::Enter, KeyModifiers::NONE)),
            Flow::Submit
        ));
        assert!(matches!(
            app.handle_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Flow::Quit
        ));
    }
}
