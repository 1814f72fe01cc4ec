use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::{descriptor::Kind, Registry};

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

const INDENT: usize = 4;
const GAP: usize = 2;
/// Descriptions never wrap narrower than this, however small the terminal.
const MIN_DESCRIPTION_WIDTH: usize = 20;

impl Registry {
    /// The usage message, with the per-option table when `detailed`.
    ///
    /// Rendered on first use and cached; registering anything afterwards
    /// drops the cache.
    pub fn usage(&self, detailed: bool) -> &str {
        self.usage[usize::from(detailed)].get_or_init(|| {
            let width = (self.width)();
            tracing::debug!(detailed, width, "rendering usage");
            render(self, detailed, width)
        })
    }
}

fn render(registry: &Registry, detailed: bool, width: usize) -> String {
    let help = &registry.help;
    let mut buf = String::new();

    if !help.header.is_empty() {
        w!(buf, "{}\n", help.header);
    }
    summary(&mut buf, registry);

    if detailed {
        let rows = table_rows(registry);
        if !rows.is_empty() {
            blank_line(&mut buf);
            table(&mut buf, &rows, width);
        }
    }

    if !help.footer.is_empty() {
        blank_line(&mut buf);
        w!(buf, "{}\n", help.footer);
    }
    buf
}

fn summary(buf: &mut String, registry: &Registry) {
    let descriptors = &registry.descriptors;
    let ungrouped = || descriptors.iter().filter(|it| it.group.is_none());

    let mut items = Vec::new();
    items.extend(ungrouped().filter(|it| it.is_positional() && it.required).map(|it| it.summary()));
    for group in ungrouped() {
        if let Kind::Group(g) = &group.kind {
            let children = g.children.iter().map(|&idx| descriptors[idx].summary());
            let (l, r) = if group.required { ("{", "}") } else { ("[", "]") };
            items.push(format!("{l}{}{r}", children.collect::<Vec<_>>().join(" | ")));
        }
    }
    items.extend(
        ungrouped()
            .filter(|it| !it.is_positional() && !it.is_group())
            .map(|it| optional(it.required, it.summary())),
    );
    items.extend(
        ungrouped()
            .filter(|it| it.is_positional() && !it.required)
            .map(|it| optional(false, it.summary())),
    );

    let name = registry.help.name;
    let column = if name.is_empty() { INDENT } else { INDENT + name.width() + 1 };
    let mut items = items.into_iter();
    match (name.is_empty(), items.next()) {
        (true, None) => return,
        (false, None) => w!(buf, "{blank:indent$}{name}\n", blank = "", indent = INDENT),
        (true, Some(first)) => w!(buf, "{blank:indent$}{first}\n", blank = "", indent = INDENT),
        (false, Some(first)) => {
            w!(buf, "{blank:indent$}{name} {first}\n", blank = "", indent = INDENT)
        }
    }
    for item in items {
        w!(buf, "{blank:column$}{item}\n", blank = "");
    }
}

fn optional(required: bool, item: String) -> String {
    if required {
        item
    } else {
        format!("[{item}]")
    }
}

fn table_rows(registry: &Registry) -> Vec<(String, &'static str)> {
    let mut rows = Vec::new();
    if !registry.help.commands.is_empty() {
        rows.push((registry.help.commands.join(", "), "Prints help information."));
    }
    for descriptor in &registry.descriptors {
        if let Some(literal) = descriptor.literal_form() {
            rows.push((literal, descriptor.description));
        }
    }
    rows
}

fn table(buf: &mut String, rows: &[(String, &str)], width: usize) {
    let left_width = rows.iter().map(|(left, _)| left.width()).max().unwrap_or(0);
    let column = INDENT + left_width + GAP;
    let available = width.saturating_sub(column).max(MIN_DESCRIPTION_WIDTH);

    for (left, description) in rows {
        let mut lines = wrap(description, available).into_iter();
        match lines.next() {
            Some(first) => {
                let pad = left_width - left.width() + GAP;
                w!(buf, "{blank:indent$}{left}{blank:pad$}{first}\n", blank = "", indent = INDENT)
            }
            None => w!(buf, "{blank:indent$}{left}\n", blank = "", indent = INDENT),
        }
        for line in lines {
            w!(buf, "{blank:column$}{line}\n", blank = "");
        }
    }
}

/// Greedy word wrap by display width. A word wider than `width` gets a line
/// of its own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn blank_line(buf: &mut String) {
    w!(buf, "\n");
}
