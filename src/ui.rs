use crate::models::Theme;

pub fn render_index(date_label: &str, theme: Theme) -> String {
    let root_class = match theme {
        Theme::Light => "light",
        Theme::Dark => "",
    };
    INDEX_HTML
        .replace("{{DATE}}", &escape_html(date_label))
        .replace("{{ROOT_CLASS}}", root_class)
        .replace("{{THEME}}", theme.as_str())
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" class="{{ROOT_CLASS}}" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>HabitLite</title>
  <style>
    :root {
      --bg: #14161a;
      --card: #1e2127;
      --ink: #eceff4;
      --muted: #9aa3b2;
      --accent: #5ec4a0;
      --danger: #e4676b;
      --line: #2c3038;
    }

    :root.light {
      --bg: #f4f2ee;
      --card: #ffffff;
      --ink: #23252a;
      --muted: #6b7280;
      --accent: #2f8f6f;
      --danger: #c2413f;
      --line: #e3e0da;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: grid;
      justify-items: center;
      padding: 28px 16px 48px;
    }

    .app {
      width: min(640px, 100%);
      display: grid;
      gap: 20px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .subtitle,
    .meta,
    .empty {
      color: var(--muted);
      margin: 0;
    }

    nav {
      display: flex;
      gap: 8px;
    }

    nav button,
    .action,
    .primary {
      border: 1px solid var(--line);
      background: var(--card);
      color: var(--ink);
      border-radius: 999px;
      padding: 8px 16px;
      cursor: pointer;
      font: inherit;
    }

    nav button.active,
    .primary {
      background: var(--accent);
      border-color: var(--accent);
      color: #0d0f12;
    }

    .screen {
      display: none;
      gap: 12px;
    }

    .screen.active {
      display: grid;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 16px;
      padding: 14px 16px;
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .left {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .check {
      width: 34px;
      height: 34px;
      border-radius: 50%;
      border: 2px solid var(--accent);
      background: transparent;
      color: var(--ink);
      cursor: pointer;
    }

    .check.done {
      background: var(--accent);
      color: #0d0f12;
    }

    .name {
      font-weight: 600;
    }

    .danger {
      color: var(--danger);
    }

    .hidden {
      display: none;
    }

    dialog {
      border: 1px solid var(--line);
      border-radius: 18px;
      background: var(--card);
      color: var(--ink);
      width: min(420px, 92vw);
    }

    dialog form {
      display: grid;
      gap: 14px;
    }

    input[type="text"] {
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid var(--line);
      background: var(--bg);
      color: var(--ink);
      font: inherit;
    }

    .chips {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    .chip.active {
      background: var(--accent);
      color: #0d0f12;
    }

    .status {
      min-height: 1.2em;
      color: var(--danger);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>HabitLite</h1>
      <p class="subtitle" id="todayDate">{{DATE}}</p>
    </header>

    <nav role="tablist">
      <button class="active" data-tab="today" role="tab" aria-selected="true">Today</button>
      <button data-tab="habits" role="tab" aria-selected="false">Habits</button>
      <button data-tab="settings" role="tab" aria-selected="false">Settings</button>
    </nav>

    <p class="status" id="status"></p>

    <section class="screen active" id="view-today">
      <ul id="todayList"></ul>
      <p class="empty hidden" id="todayEmpty">Nothing scheduled for today.</p>
    </section>

    <section class="screen" id="view-habits">
      <button class="primary" id="btnAddHabit">Add habit</button>
      <ul id="habitsList"></ul>
      <p class="empty hidden" id="habitsEmpty">No habits yet.</p>
    </section>

    <section class="screen" id="view-settings">
      <label><input type="checkbox" id="darkToggle" /> Dark mode</label>
      <button class="action danger" id="btnReset">Delete all habits</button>
    </section>
  </main>

  <dialog id="habitDialog">
    <form id="habitForm" method="dialog">
      <h2 id="habitDialogTitle">Add habit</h2>
      <input type="hidden" id="habitId" />
      <input type="text" id="habitName" placeholder="Name" autocomplete="off" />
      <div class="chips">
        <button type="button" class="action chip" data-day="1">Mon</button>
        <button type="button" class="action chip" data-day="2">Tue</button>
        <button type="button" class="action chip" data-day="3">Wed</button>
        <button type="button" class="action chip" data-day="4">Thu</button>
        <button type="button" class="action chip" data-day="5">Fri</button>
        <button type="button" class="action chip" data-day="6">Sat</button>
        <button type="button" class="action chip" data-day="7">Sun</button>
      </div>
      <p class="status" id="formStatus"></p>
      <div class="left">
        <button type="submit" class="primary">Save</button>
        <button type="button" class="action" id="habitCancel">Cancel</button>
      </div>
    </form>
  </dialog>

  <script>
    const $ = (id) => document.getElementById(id);
    const statusEl = $('status');
    let habits = [];

    const escapeHtml = (s) => s.replace(/[&<>"']/g, (m) => ({
      '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
    }[m]));

    const api = async (method, path, body) => {
      const res = await fetch(path, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const setStatus = (message) => {
      statusEl.textContent = message || '';
    };

    const activate = (tab) => {
      document.querySelectorAll('nav button').forEach((button) => {
        const active = button.dataset.tab === tab;
        button.classList.toggle('active', active);
        button.setAttribute('aria-selected', String(active));
      });
      document.querySelectorAll('.screen').forEach((screen) => {
        screen.classList.toggle('active', screen.id === `view-${tab}`);
      });
    };

    const renderToday = (view) => {
      $('todayDate').textContent = view.date_label;
      $('todayEmpty').classList.toggle('hidden', view.habits.length !== 0);
      $('todayList').innerHTML = view.habits.map((h) => `
        <li class="card">
          <div class="left">
            <button class="check ${h.done ? 'done' : ''}" data-action="toggle" data-id="${escapeHtml(h.id)}" aria-pressed="${h.done}">${h.done ? '✓' : ''}</button>
            <div>
              <div class="name">${escapeHtml(h.name)}</div>
              <div class="meta">${escapeHtml(h.progress)}</div>
            </div>
          </div>
          <div>
            <button class="action" data-action="edit" data-id="${escapeHtml(h.id)}">Edit</button>
            <button class="action danger" data-action="delete" data-id="${escapeHtml(h.id)}">Delete</button>
          </div>
        </li>`).join('');
    };

    const renderHabits = (items) => {
      habits = items;
      $('habitsEmpty').classList.toggle('hidden', items.length !== 0);
      $('habitsList').innerHTML = items.map((h) => `
        <li class="card">
          <div>
            <div class="name">${escapeHtml(h.name)}</div>
            <div class="meta">Days: ${escapeHtml(h.day_labels)}</div>
          </div>
          <div>
            <button class="action" data-action="edit" data-id="${escapeHtml(h.id)}">Edit</button>
            <button class="action danger" data-action="delete" data-id="${escapeHtml(h.id)}">Delete</button>
          </div>
        </li>`).join('');
    };

    const refresh = async () => {
      const [today, items] = await Promise.all([api('GET', '/api/today'), api('GET', '/api/habits')]);
      renderToday(today);
      renderHabits(items);
    };

    const applyTheme = (theme) => {
      document.documentElement.classList.toggle('light', theme === 'light');
      $('darkToggle').checked = theme !== 'light';
    };

    const openDialog = (id) => {
      const form = $('habitForm');
      form.reset();
      $('formStatus').textContent = '';
      $('habitId').value = id || '';
      $('habitDialogTitle').textContent = id ? 'Edit habit' : 'Add habit';
      const existing = habits.find((h) => h.id === id);
      $('habitName').value = existing ? existing.name : '';
      const days = existing ? existing.days : [];
      form.querySelectorAll('.chip').forEach((chip) => {
        chip.classList.toggle('active', days.includes(Number(chip.dataset.day)));
      });
      $('habitDialog').showModal();
    };

    const onListClick = (event) => {
      const target = event.target.closest('[data-action]');
      if (!target) {
        return;
      }
      const id = target.dataset.id;
      const action = target.dataset.action;
      if (action === 'toggle') {
        api('POST', `/api/habits/${encodeURIComponent(id)}/toggle`).then(refresh).catch((err) => setStatus(err.message));
      } else if (action === 'edit') {
        openDialog(id);
      } else if (action === 'delete' && confirm('Delete this habit?')) {
        api('DELETE', `/api/habits/${encodeURIComponent(id)}`).then(refresh).catch((err) => setStatus(err.message));
      }
    };

    document.querySelectorAll('nav button').forEach((button) => {
      button.addEventListener('click', () => activate(button.dataset.tab));
    });
    document.querySelectorAll('.chip').forEach((chip) => {
      chip.addEventListener('click', () => chip.classList.toggle('active'));
    });
    $('todayList').addEventListener('click', onListClick);
    $('habitsList').addEventListener('click', onListClick);
    $('btnAddHabit').addEventListener('click', () => openDialog());
    $('habitCancel').addEventListener('click', () => $('habitDialog').close());

    $('habitForm').addEventListener('submit', (event) => {
      event.preventDefault();
      const id = $('habitId').value;
      const body = {
        name: $('habitName').value,
        days: Array.from(document.querySelectorAll('.chip.active')).map((chip) => Number(chip.dataset.day))
      };
      const request = id
        ? api('PUT', `/api/habits/${encodeURIComponent(id)}`, body)
        : api('POST', '/api/habits', body);
      request
        .then(() => {
          $('habitDialog').close();
          return refresh();
        })
        .catch((err) => {
          $('formStatus').textContent = err.message;
        });
    });

    $('darkToggle').addEventListener('change', () => {
      const theme = $('darkToggle').checked ? 'dark' : 'light';
      api('PUT', '/api/settings', { theme }).then((s) => applyTheme(s.theme)).catch((err) => setStatus(err.message));
    });

    $('btnReset').addEventListener('click', () => {
      if (confirm('Delete all habits? This cannot be undone.')) {
        api('POST', '/api/reset').then(refresh).catch((err) => setStatus(err.message));
      }
    });

    applyTheme(document.documentElement.dataset.theme);
    refresh().catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
