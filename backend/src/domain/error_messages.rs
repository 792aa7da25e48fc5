//! User-facing message catalogue.
//!
//! Messages are Japanese because they are rendered verbatim on the
//! invitation site. Developer-facing messages stay in English.

use super::error::ErrorSeverity;

/// Fallback used for status codes without a dedicated message.
pub const GENERIC_USER_MESSAGE: &str =
    "エラーが発生しました。しばらく時間をおいてから再度お試しください。";

/// Message shown when an upstream body cannot be decoded.
pub const RESPONSE_PARSE_FAILURE_MESSAGE: &str = "レスポンスの解析に失敗しました";

/// Message for a status code, falling back to [`GENERIC_USER_MESSAGE`].
///
/// # Examples
/// ```
/// use invitation::domain::error_messages::{default_user_message, GENERIC_USER_MESSAGE};
///
/// assert_eq!(default_user_message(418), GENERIC_USER_MESSAGE);
/// ```
pub const fn default_user_message(status_code: u16) -> &'static str {
    match status_code {
        400 => "入力内容に誤りがあります。内容をご確認ください。",
        401 => "認証が必要です。ページを再読み込みしてから再度お試しください。",
        403 => "この操作を行う権限がありません。",
        404 => "お探しの情報が見つかりませんでした。",
        409 => "データが競合しています。ページを再読み込みしてから再度お試しください。",
        422 => "入力内容を処理できませんでした。内容をご確認ください。",
        429 => "アクセスが集中しています。しばらく時間をおいてから再度お試しください。",
        500 => "サーバーでエラーが発生しました。しばらく時間をおいてから再度お試しください。",
        502 => "サーバーとの通信に失敗しました。しばらく時間をおいてから再度お試しください。",
        503 => "現在サービスをご利用いただけません。しばらく時間をおいてから再度お試しください。",
        504 => "サーバーの応答がタイムアウトしました。しばらく時間をおいてから再度お試しください。",
        _ => GENERIC_USER_MESSAGE,
    }
}

/// Message used when an error carries no explicit user message.
pub const fn severity_user_message(severity: ErrorSeverity) -> &'static str {
    match severity {
        ErrorSeverity::Low => "入力内容をご確認のうえ、もう一度お試しください。",
        ErrorSeverity::Medium => "エラーが発生しました。内容をご確認のうえ、もう一度お試しください。",
        ErrorSeverity::High => GENERIC_USER_MESSAGE,
        ErrorSeverity::Critical => {
            "重大なエラーが発生しました。お手数ですが新郎新婦までご連絡ください。"
        }
    }
}

/// Japanese label for a known RSVP form field.
pub fn field_label(field: &str) -> Option<&'static str> {
    let label = match field {
        "name" => "お名前",
        "furigana" => "ふりがな",
        "email" => "メールアドレス",
        "phone" => "電話番号",
        "postalCode" => "郵便番号",
        "address" => "ご住所",
        "attendance" => "ご出欠",
        "companions" => "同伴者数",
        "allergies" => "アレルギー",
        "message" => "メッセージ",
        _ => return None,
    };
    Some(label)
}

fn fallback_message(field: &str) -> String {
    let label = field_label(field).unwrap_or(field);
    format!("{label}の入力内容をご確認ください。")
}

/// Message for a rejected form field.
///
/// Known field and rule pairs resolve through the table; anything else
/// yields `"<label>の入力内容をご確認ください。"`.
///
/// # Examples
/// ```
/// use invitation::domain::error_messages::default_form_user_message;
///
/// assert_eq!(default_form_user_message("email", "required"), "メールアドレスを入力してください。");
/// assert_eq!(default_form_user_message("nickname", "required"), "nicknameの入力内容をご確認ください。");
/// ```
pub fn default_form_user_message(field: &str, rule: &str) -> String {
    let Some(label) = field_label(field) else {
        return fallback_message(field);
    };
    match (field, rule) {
        ("attendance", "required") => "ご出欠を選択してください。".to_owned(),
        ("companions", "maxLength" | "pattern") => {
            "同伴者数は0〜5名の範囲で入力してください。".to_owned()
        }
        ("furigana", "pattern") => "ふりがなはひらがなで入力してください。".to_owned(),
        (_, "required") => format!("{label}を入力してください。"),
        (_, "email") => "メールアドレスの形式が正しくありません。".to_owned(),
        (_, "phone") => "電話番号は10桁または11桁の数字で入力してください。".to_owned(),
        (_, "postalCode") => "郵便番号は7桁の数字で入力してください。".to_owned(),
        (_, "minLength") => format!("{label}が短すぎます。"),
        (_, "maxLength") => format!("{label}は文字数の上限を超えています。"),
        (_, "pattern") => format!("{label}の形式が正しくありません。"),
        _ => fallback_message(field),
    }
}

/// Message for a value rejected outside a form submission.
///
/// # Examples
/// ```
/// use invitation::domain::error_messages::default_validation_user_message;
///
/// assert_eq!(
///     default_validation_user_message("postalCode", "postalCode"),
///     "郵便番号は7桁の数字（ハイフンなし可）で指定してください。",
/// );
/// ```
pub fn default_validation_user_message(field: &str, rule: &str) -> String {
    let Some(label) = field_label(field) else {
        return fallback_message(field);
    };
    match rule {
        "required" => format!("{label}は必須項目です。"),
        "email" => "有効なメールアドレスを指定してください。".to_owned(),
        "phone" => "有効な電話番号を指定してください。".to_owned(),
        "postalCode" => "郵便番号は7桁の数字（ハイフンなし可）で指定してください。".to_owned(),
        "minLength" => format!("{label}の文字数が不足しています。"),
        "maxLength" => format!("{label}の文字数が多すぎます。"),
        "pattern" => format!("{label}の形式が正しくありません。"),
        _ => fallback_message(field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(400)]
    #[case(401)]
    #[case(403)]
    #[case(404)]
    #[case(409)]
    #[case(422)]
    #[case(429)]
    #[case(500)]
    #[case(502)]
    #[case(503)]
    #[case(504)]
    fn documented_status_codes_have_dedicated_messages(#[case] status: u16) {
        assert_ne!(default_user_message(status), GENERIC_USER_MESSAGE);
    }

    #[rstest]
    #[case(0)]
    #[case(200)]
    #[case(302)]
    #[case(418)]
    #[case(501)]
    #[case(599)]
    fn other_status_codes_use_generic_message(#[case] status: u16) {
        assert_eq!(default_user_message(status), GENERIC_USER_MESSAGE);
    }

    #[test]
    fn not_found_message_is_fixed() {
        assert_eq!(default_user_message(404), "お探しの情報が見つかりませんでした。");
    }

    #[rstest]
    #[case("name", "required", "お名前を入力してください。")]
    #[case("attendance", "required", "ご出欠を選択してください。")]
    #[case("furigana", "pattern", "ふりがなはひらがなで入力してください。")]
    #[case("message", "maxLength", "メッセージは文字数の上限を超えています。")]
    #[case("phone", "unknownRule", "電話番号の入力内容をご確認ください。")]
    #[case("nickname", "required", "nicknameの入力内容をご確認ください。")]
    fn form_messages_resolve_through_table(
        #[case] field: &str,
        #[case] rule: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(default_form_user_message(field, rule), expected);
    }

    #[rstest]
    #[case("email", "required", "メールアドレスは必須項目です。")]
    #[case("address", "maxLength", "ご住所の文字数が多すぎます。")]
    #[case("address", "custom", "ご住所の入力内容をご確認ください。")]
    #[case("seat", "pattern", "seatの入力内容をご確認ください。")]
    fn validation_messages_resolve_through_table(
        #[case] field: &str,
        #[case] rule: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(default_validation_user_message(field, rule), expected);
    }

    #[test]
    fn every_severity_has_a_message() {
        for severity in [
            ErrorSeverity::Low,
            ErrorSeverity::Medium,
            ErrorSeverity::High,
            ErrorSeverity::Critical,
        ] {
            assert!(!severity_user_message(severity).is_empty());
        }
    }
}
