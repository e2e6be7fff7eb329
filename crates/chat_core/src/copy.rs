//! Fixed user-facing strings shown by the widget.

/// Keyword answered locally with [`INFO_REPLY`] instead of asking the remote service.
pub const SHORTCUT_KEYWORD: &str = "정보";

/// Synthetic bot message seeded into every new timeline.
pub const WELCOME_MESSAGE: &str = "안녕하세요. 엔큐브 챗봇 다큐브입니다.\n다큐브는 지금 공부중이라 내용이 조금 틀릴 수 있어요.\n제공되는 정보가 궁금하시면 \"정보\" 라고 입력해주세요.";

/// Reply to the shortcut keyword.
pub const INFO_REPLY: &str = "현재 회사 소개와 회사 주소, 이메일, 전화번호, 창립일, 그리고 회사에서 하는 일 대해 설명해드릴 수 있어요.\n무엇이 궁금하신가요?";

/// Bot message appended when the remote answer could not be obtained.
pub const ERROR_REPLY: &str = "죄송합니다. 메시지를 보내는 데 실패했습니다.";

pub const USER_TYPING_LABEL: &str = "사용자 작성중...";
pub const BOT_WAITING_LABEL: &str = "응답 대기중...";

pub const HEADER_TITLE: &str = "챗봇 다큐브에게 질문해보세요!";
pub const HEADER_SUBTITLE: &str = "*다큐브는 아직 공부중이므로 대답이 틀릴 수 있어요.";
pub const INPUT_PLACEHOLDER: &str = "메시지를 입력하세요...";
