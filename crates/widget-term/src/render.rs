//! Line-oriented drawing of widget snapshots.

use chat_core::copy::{BOT_WAITING_LABEL, USER_TYPING_LABEL};
use chat_core::Sender;
use chat_state::{GazeState, PupilShape};
use chat_widget::WidgetSnapshot;
use colored::Colorize;

const EYE_WIDTH: i8 = 5;

/// Draw one eye as `(` + pupil track + `)`.
pub fn eye(gaze: GazeState) -> String {
    let pupil = gaze.pupil();
    let column = (EYE_WIDTH / 2 + pupil.dx / 3).clamp(0, EYE_WIDTH - 1);
    let glyph = match pupil.shape {
        PupilShape::Slit => '-',
        PupilShape::Round if pupil.dy < 0 => '°',
        PupilShape::Round if pupil.dy > 0 => '.',
        PupilShape::Round => 'o',
    };

    let track: String = (0..EYE_WIDTH)
        .map(|i| if i == column { glyph } else { ' ' })
        .collect();
    format!("({})", track)
}

pub fn eyes(gaze: GazeState) -> String {
    let eye = eye(gaze);
    format!("{} {}", eye, eye)
}

/// Prints only what changed since the previous snapshot.
#[derive(Default)]
pub struct Renderer {
    shown_messages: usize,
    last: Option<WidgetSnapshot>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, snapshot: &WidgetSnapshot) {
        for message in snapshot.messages.iter().skip(self.shown_messages) {
            let time = message
                .created_at()
                .with_timezone(&chrono::Local)
                .format("%H:%M");
            match message.sender() {
                Sender::User => println!(
                    "{} {}",
                    format!("[{}] You:", time).cyan().bold(),
                    message.text()
                ),
                Sender::Bot => {
                    println!("{}", format!("[{}] Bot:", time).green().bold());
                    for line in message.text().lines() {
                        println!("  {}", line);
                    }
                }
            }
        }
        self.shown_messages = snapshot.messages.len();

        let previous = self.last.as_ref();
        if previous.map(|p| p.gaze) != Some(snapshot.gaze) {
            println!(
                "{}",
                format!("{}  {}", eyes(snapshot.gaze), snapshot.gaze.as_str()).dimmed()
            );
        }
        if snapshot.user_typing && !previous.is_some_and(|p| p.user_typing) {
            println!("{}", USER_TYPING_LABEL.yellow());
        }
        if snapshot.bot_waiting && !previous.is_some_and(|p| p.bot_waiting) {
            println!("{}", BOT_WAITING_LABEL.yellow());
        }

        self.last = Some(snapshot.clone());
    }
}
