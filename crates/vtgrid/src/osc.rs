//! OSC payload dispatch: titles, hyperlinks, colors, clipboard.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::color::parse_color_spec;
use crate::response;
use crate::snapshot::{ClipboardPayload, QueuedEvent};
use crate::terminal::Terminal;

/// OSC 52 safety bound on the base64 text itself.
pub const MAX_CLIPBOARD_BASE64: usize = 4096;

/// OSC 52 safety bound on the decoded clipboard payload.
pub const MAX_CLIPBOARD_BYTES: usize = 2048;

impl Terminal {
    pub(crate) fn execute_osc(&mut self, payload: &[u8]) {
        // Legacy xterm forms predating numbered OSC: `l<text>` sets the
        // title, `L<text>` the icon name.
        if let Some(rest) = payload.strip_prefix(b"l") {
            self.osc_set_title(rest);
            return;
        }
        if let Some(rest) = payload.strip_prefix(b"L") {
            self.osc_set_icon(rest);
            return;
        }

        let (code, rest) = match payload.iter().position(|&b| b == b';') {
            Some(split) => (&payload[..split], Some(&payload[split + 1..])),
            None => (payload, None),
        };
        let Ok(code) = atoi_simd::parse::<u16>(code) else {
            tracing::debug!("ignoring OSC with non-numeric code");
            return;
        };
        match (code, rest) {
            (0, Some(rest)) => {
                self.osc_set_title(rest);
                self.osc_set_icon(rest);
            }
            (1, Some(rest)) => self.osc_set_icon(rest),
            (2, Some(rest)) => self.osc_set_title(rest),
            (4, Some(rest)) => self.osc_palette(rest),
            (8, Some(rest)) => self.osc_hyperlink(rest),
            (10 | 11, Some(rest)) => self.osc_default_colors(code, rest),
            (21, _) => {
                let report = response::title_report(&self.window().title);
                self.queue_event(QueuedEvent::Response(report));
            }
            (52, Some(rest)) => self.osc_clipboard(rest),
            (code, _) => {
                tracing::debug!(code, "ignoring unhandled OSC");
            }
        }
    }

    fn osc_set_title(&mut self, text: &[u8]) {
        let title = String::from_utf8_lossy(text).into_owned();
        self.window_mut().title = title.clone();
        self.queue_event(QueuedEvent::Title(title));
        self.mark_dirty();
    }

    fn osc_set_icon(&mut self, text: &[u8]) {
        let icon = String::from_utf8_lossy(text).into_owned();
        self.window_mut().icon_name = icon.clone();
        self.queue_event(QueuedEvent::Icon(icon));
        self.mark_dirty();
    }

    /// OSC 4: `idx;spec` pairs; `?` specs answer with the palette
    /// entry, anything else parses as an X color spec and sets it.
    fn osc_palette(&mut self, rest: &[u8]) {
        let text = String::from_utf8_lossy(rest).into_owned();
        let mut parts = text.split(';');
        while let (Some(index), Some(spec)) = (parts.next(), parts.next()) {
            let Ok(index) = index.parse::<u16>() else {
                tracing::debug!(index, "ignoring non-numeric palette index");
                continue;
            };
            let Ok(index) = u8::try_from(index) else {
                tracing::debug!(index, "ignoring out-of-range palette index");
                continue;
            };
            if spec == "?" {
                let color = self.palette().get(index);
                self.queue_event(QueuedEvent::Response(response::palette_color(
                    index, color,
                )));
            } else if let Some(color) = parse_color_spec(spec) {
                self.palette_mut().set(index, color);
            } else {
                tracing::debug!(spec, "ignoring unparsable palette color");
            }
        }
    }

    /// OSC 8: `params;URI`. An empty URI ends the hyperlink; the params
    /// (including the `id=` key some emitters send) are not retained.
    fn osc_hyperlink(&mut self, rest: &[u8]) {
        let text = String::from_utf8_lossy(rest);
        let uri = match text.split_once(';') {
            Some((_params, uri)) => uri,
            // Missing separator: treat the whole payload as the URI.
            None => &*text,
        };
        self.pen_mut().link = if uri.is_empty() {
            None
        } else {
            Some(Arc::from(uri))
        };
    }

    /// OSC 10/11 with xterm's chaining: extra arguments advance to the
    /// next color code, so `OSC 10;fg;bg` sets both.
    fn osc_default_colors(&mut self, code: u16, rest: &[u8]) {
        let text = String::from_utf8_lossy(rest).into_owned();
        let mut code = code;
        for arg in text.split(';') {
            if code > 11 {
                break;
            }
            if arg == "?" {
                let color = if code == 10 {
                    self.theme().foreground
                } else {
                    self.theme().background
                };
                #[allow(clippy::cast_possible_truncation)]
                self.queue_event(QueuedEvent::Response(response::default_color(
                    code as u8, color,
                )));
            } else if let Some(color) = parse_color_spec(arg) {
                if code == 10 {
                    self.theme_mut().foreground = color;
                } else {
                    self.theme_mut().background = color;
                }
            } else {
                tracing::debug!(arg, "ignoring unparsable default color");
            }
            code += 1;
        }
    }

    /// OSC 52: `selection;base64`. Query (`?`) and set/clear both
    /// surface as clipboard events; anything malformed or over the
    /// safety limits is dropped without one.
    fn osc_clipboard(&mut self, rest: &[u8]) {
        let (selection, data) = match rest.iter().position(|&b| b == b';') {
            Some(split) => (&rest[..split], &rest[split + 1..]),
            None => {
                tracing::debug!("ignoring OSC 52 without data field");
                return;
            }
        };
        let selection = String::from_utf8_lossy(selection);
        let selection = if selection.is_empty() {
            "c".to_string()
        } else {
            selection.into_owned()
        };

        if data == b"?" {
            self.queue_event(QueuedEvent::Clipboard(
                selection,
                ClipboardPayload::Query,
            ));
            return;
        }
        if data.len() > MAX_CLIPBOARD_BASE64 {
            tracing::debug!(len = data.len(), "dropping oversized OSC 52 payload");
            return;
        }
        let Ok(decoded) = BASE64.decode(data) else {
            tracing::debug!("dropping OSC 52 with invalid base64");
            return;
        };
        if decoded.len() > MAX_CLIPBOARD_BYTES {
            tracing::debug!(
                len = decoded.len(),
                "dropping oversized decoded OSC 52 payload"
            );
            return;
        }
        self.queue_event(QueuedEvent::Clipboard(
            selection,
            ClipboardPayload::Data(decoded),
        ));
    }
}
