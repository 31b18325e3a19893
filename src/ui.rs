use crate::fragments::{escape_html, fill, render_created, TextMode};
use crate::models::JournalEntry;

pub fn render_home(entries: &[JournalEntry]) -> String {
    let list = if entries.is_empty() {
        EMPTY_HTML.to_string()
    } else {
        entries
            .iter()
            .map(|entry| render_created(entry, TextMode::RawHtml))
            .collect::<Vec<_>>()
            .join("\n")
    };
    page("Learning Journal", &fill(HOME_HTML, &[("ENTRIES", list)]))
}

/// Detail page for one entry. `source` is the Markdown the edit form starts from.
pub fn render_detail(entry: &JournalEntry, source: &str) -> String {
    let id = entry.id.map(|id| id.to_string()).unwrap_or_default();
    let body = fill(
        DETAIL_HTML,
        &[
            ("ID", escape_html(&id)),
            ("TITLE", escape_html(&entry.title)),
            ("CREATED", escape_html(&entry.created)),
            ("TEXT", entry.text.clone()),
            ("SOURCE", escape_html(source)),
        ],
    );
    page(&entry.title, &body)
}

fn page(title: &str, body: &str) -> String {
    fill(
        LAYOUT_HTML,
        &[("PAGE_TITLE", escape_html(title)), ("BODY", body.to_string())],
    )
}

const EMPTY_HTML: &str = r#"<p class="empty">No entries here so far</p>"#;

const HOME_HTML: &str = r#"<header>
      <h1>Learning Journal</h1>
      <button id="createBtn" class="btn" type="button">New entry</button>
    </header>

    <section class="createForm" style="display: none">
      <form method="post" action="/add">
        <label for="title">Title</label>
        <input id="title" name="title" type="text" maxlength="127" />
        <label for="text">Text (Markdown)</label>
        <textarea id="text" name="text" rows="10"></textarea>
        <input id="addBtn" class="btn" type="submit" value="Share" name="Share"/>
      </form>
    </section>

    <section class="entries">
{{ENTRIES}}
    </section>"#;

const DETAIL_HTML: &str = r#"<header>
      <a class="back" href="/">&larr; All entries</a>
    </header>

    <div class="detailForm">
      <article id="entry-{{ID}}">
        <h1 class="headingLink">{{TITLE}}</h1>
        <p><small>{{CREATED}}</small></p>
        <div>{{TEXT}}<br><br>
        <hr class="titleDivider">
        </div>
      </article>
      <div class="actions">
        <button id="editBtn" class="btn">Edit Post</button>
        <a href="https://twitter.com/share" class="twitter-share-button" data-text="{{TITLE}}">Tweet</a>
      </div>
    </div>

    <section class="editForm" style="display: none">
      <form method="post" action="/edit" data-entry-id="{{ID}}">
        <input type="hidden" name="id" value="{{ID}}" />
        <label for="title">Title</label>
        <input id="title" name="title" type="text" maxlength="127" value="{{TITLE}}" />
        <label for="text">Text (Markdown)</label>
        <textarea id="text" name="text" rows="10">{{SOURCE}}</textarea>
        <input id="submitBtn" class="btn" type="submit" value="Share" name="Share"/>
        <button id="cancelBtn" class="btn btn-quiet" type="button">Cancel</button>
      </form>
    </section>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{PAGE_TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --muted: #6f6a65;
      --accent: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0;
    }

    .headingLink {
      font-size: 1.6rem;
    }

    a {
      color: var(--accent);
    }

    small,
    .empty {
      color: var(--muted);
    }

    form {
      display: grid;
      gap: 10px;
    }

    input[type="text"],
    textarea {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      justify-self: start;
    }

    .btn-quiet {
      background: transparent;
      color: var(--accent);
    }

    .actions {
      display: flex;
      align-items: center;
      gap: 16px;
    }

    .titleDivider {
      border: none;
      border-top: 1px solid rgba(47, 72, 88, 0.12);
    }

    .codehilite {
      background: #2b2a28;
      color: #f8f3e6;
      border-radius: 12px;
      padding: 4px 16px;
      overflow-x: auto;
    }
  </style>
</head>
<body>
  <main class="app">
    {{BODY}}
  </main>
  <script src="/static/journal.js"></script>
</body>
</html>
"#;

pub const JOURNAL_JS: &str = r#"(() => {
  const SPEED = 600;
  const $ = (selector) => document.querySelector(selector);
  const wait = (ms) => new Promise((resolve) => setTimeout(resolve, ms));

  const escapeHtml = (value) =>
    String(value ?? '')
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;')
      .replace(/'/g, '&#39;');

  const hide = async (selector) => {
    const el = $(selector);
    if (!el) {
      return;
    }
    el.style.transition = `opacity ${SPEED}ms ease`;
    el.style.opacity = '0';
    await wait(SPEED);
    el.style.display = 'none';
  };

  const show = async (selector) => {
    const el = $(selector);
    if (!el) {
      return;
    }
    el.style.opacity = '0';
    el.style.display = '';
    el.style.transition = `opacity ${SPEED}ms ease`;
    await wait(20);
    el.style.opacity = '1';
    await wait(SPEED);
  };

  const insertAfter = (selector, html) => {
    const el = $(selector);
    if (el) {
      el.insertAdjacentHTML('afterend', html);
    }
  };

  const reset = (selector) => {
    const el = $(selector);
    if (el) {
      el.blur();
    }
  };

  const value = (selector) => {
    const el = $(selector);
    return el ? el.value : '';
  };

  const post = async (url, fields) => {
    const res = await fetch(url, {
      method: 'POST',
      headers: { accept: 'application/json' },
      body: new URLSearchParams(fields)
    });
    if (!res.ok) {
      throw new Error(`${url} answered ${res.status}`);
    }
    return res.json();
  };

  const createdFragment = (entry) => {
    const id = escapeHtml(entry.id);
    return `<article id="entry-${id}">` +
      `<a href="/detail/${id}"><h1 class="headingLink">${escapeHtml(entry.title)}</h1></a>` +
      `<p><small>${escapeHtml(entry.created)}</small></p>` +
      `<div>${entry.text ?? ''}<br>` +
      '<hr class="titleDivider"></div>' +
      '</article>';
  };

  const updatedFragment = (entry) =>
    '<div class="detailForm">' +
    `<article id="entry-${escapeHtml(entry.id)}">` +
    `<h1 class="headingLink">${escapeHtml(entry.title)}</h1>` +
    `<p><small>${escapeHtml(entry.created)}</small></p>` +
    `<div>${entry.text ?? ''}<br><br>` +
    '<hr class="titleDivider">' +
    '</div></article></div>';

  const on = (selector, handler) => {
    const el = $(selector);
    if (el) {
      el.addEventListener('click', handler);
    }
  };

  // Failures leave the page as it was.
  on('#addBtn', async (event) => {
    event.preventDefault();
    try {
      const entry = await post('/add', { title: value('#title'), text: value('#text') });
      reset('#addBtn');
      insertAfter('.createForm', createdFragment(entry));
      await hide('.createForm');
    } catch (err) {
      console.warn(err);
    }
  });

  on('#submitBtn', async (event) => {
    event.preventDefault();
    const form = $('.editForm form');
    const id = form ? form.dataset.entryId ?? '' : '';
    try {
      const entry = await post('/edit', { id, title: value('#title'), text: value('#text') });
      reset('#submitBtn');
      insertAfter('.editForm', updatedFragment(entry));
      await hide('.editForm');
    } catch (err) {
      console.warn(err);
    }
  });

  on('#editBtn', async () => {
    await hide('.detailForm');
    await show('.editForm');
  });

  on('#cancelBtn', async () => {
    await hide('.editForm');
    await show('.detailForm');
  });

  on('#createBtn', async () => {
    await show('.createForm');
  });
})();
"#;
