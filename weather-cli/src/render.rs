use chrono::Local;
use weather_core::DisplayPayload;

/// Text block followed by the glyph on its own line.
pub fn render(payload: &DisplayPayload) -> String {
    let mut out = payload.to_string();

    if let Some(at) = payload.observed_at {
        let local = at.with_timezone(&Local);
        out.push_str(&format!("\nObserved: {}", local.format("%Y-%m-%d %H:%M")));
    }

    out.push_str(&format!("\n\n    {}\n", payload.glyph));
    out
}
