use common::{parse_snapshot, render_leaderboard};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use terminal::app::AppCommand;
use terminal::poll::UiEvent;
use terminal::views::{LeaderboardView, ProblemView, View};

const SCENARIO: &str = r#"{
    "alice": {"score": 10, "solved": 2, "problem_scores": [{"score": 5}, {"score": 5}], "diamonds": [], "golds": [0]},
    "bob": {"score": 8, "solved": 1, "problem_scores": [{"score": 8}, {"score": 0}], "diamonds": [1], "golds": []}
}"#;

fn draw(view: &dyn View) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal.draw(|f| view.render(f)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn scenario_frame(admin: bool) -> UiEvent {
    UiEvent::Leaderboard(render_leaderboard(&parse_snapshot(SCENARIO).unwrap(), admin))
}

#[test]
fn test_leaderboard_renders_ranked_rows_and_badges() {
    let mut view = LeaderboardView::new();
    view.on_event(&scenario_frame(false));

    let screen = draw(&view);
    let bob = screen.find("bob").unwrap();
    let alice = screen.find("alice").unwrap();
    assert!(bob < alice);
    assert!(screen.contains("◆ 0"));
    assert!(screen.contains("★ 5"));
    assert!(screen.contains("P2"));
    assert!(!screen.contains("[x]"));
}

#[test]
fn test_empty_frame_keeps_headers() {
    let mut view = LeaderboardView::new();
    view.on_event(&scenario_frame(false));
    view.on_event(&UiEvent::Leaderboard(render_leaderboard(&Default::default(), false)));

    assert_eq!(view.headers(), ["#", "User", "P1", "P2", "Solved", "Score"]);
    assert!(view.rows().is_empty());
    assert!(draw(&view).contains("P2"));
}

#[test]
fn test_removal_control_for_admin() {
    let mut view = LeaderboardView::new();
    view.on_event(&scenario_frame(true));
    assert!(draw(&view).contains("[x] bob"));

    view.handle_input(key(KeyCode::Down));
    match view.handle_input(key(KeyCode::Char('x'))) {
        Some(AppCommand::RemoveUser(control)) => {
            assert_eq!(control.field, "alice");
            assert_eq!(control.value, "x");
        }
        other => panic!("expected removal, got {:?}", other),
    }
}

#[test]
fn test_no_removal_without_admin() {
    let mut view = LeaderboardView::new();
    view.on_event(&scenario_frame(false));
    assert_eq!(view.handle_input(key(KeyCode::Char('x'))), None);
}

#[test]
fn test_selection_clamped_when_rows_shrink() {
    let mut view = LeaderboardView::new();
    view.on_event(&scenario_frame(false));
    view.handle_input(key(KeyCode::Down));
    view.handle_input(key(KeyCode::Down));
    assert_eq!(view.selected_row().unwrap().username, "alice");

    let single = parse_snapshot(r#"{"zed": {"score": 1, "solved": 0, "problem_scores": []}}"#).unwrap();
    view.on_event(&UiEvent::Leaderboard(render_leaderboard(&single, false)));
    assert_eq!(view.selected_row().unwrap().username, "zed");
}

#[test]
fn test_problem_view_byte_counter() {
    let mut view = ProblemView::new("x=");
    assert_eq!(view.mirror().byte_len(), 2);

    view.handle_input(key(KeyCode::Char('€')));
    assert_eq!(view.mirror().backing(), "x=€");
    assert_eq!(view.mirror().byte_len(), 5);

    view.handle_input(key(KeyCode::Backspace));
    assert_eq!(view.mirror().byte_len(), 2);

    view.handle_input(key(KeyCode::Enter));
    view.handle_input(key(KeyCode::Tab));
    assert_eq!(view.mirror().backing(), "x=\n    ");
    assert_eq!(view.mirror().byte_len(), 7);
}

#[test]
fn test_problem_view_submit_shortcuts() {
    let mut view = ProblemView::new("");
    for c in "print(1)".chars() {
        view.handle_input(key(KeyCode::Char(c)));
    }

    assert_eq!(
        view.handle_input(ctrl('s')),
        Some(AppCommand::Submit("print(1)".to_string()))
    );
    assert_eq!(
        view.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL)),
        Some(AppCommand::Submit("print(1)".to_string()))
    );
    assert_eq!(view.handle_input(ctrl('l')), Some(AppCommand::OpenLeaderboard));
    assert_eq!(view.mirror().backing(), "print(1)");
}

#[test]
fn test_problem_view_clock() {
    let mut view = ProblemView::new("é");
    assert!(draw(&view).contains("--:--"));

    view.on_event(&UiEvent::Clock("01:05".to_string()));
    let screen = draw(&view);
    assert!(screen.contains("01:05"));
    assert!(screen.contains("2 bytes"));

    view.on_event(&UiEvent::TimeUp);
    assert!(view.is_time_up());
    assert!(draw(&view).contains("time's up"));
}
