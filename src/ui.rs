pub fn render_index() -> &'static str {
    INDEX_HTML
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Buddy</title>
  <style>
    :root {
      --bg-1: #10131a;
      --bg-2: #1b212e;
      --ink: #e8ecf4;
      --muted: #8a93a6;
      --accent: #00c853;
      --warn: #ffeb3b;
      --bad: #ff4d4d;
      --card: #181e2a;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      padding: 24px;
    }

    h1 { margin: 0 0 18px; font-size: 1.6rem; }
    h2 { margin: 0 0 12px; font-size: 1.05rem; color: var(--muted); text-transform: uppercase; letter-spacing: 0.08em; }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 20px;
      margin-bottom: 20px;
      box-shadow: 0 12px 30px rgba(0, 0, 0, 0.35);
    }

    .row { display: flex; gap: 10px; flex-wrap: wrap; align-items: center; }

    input, select, button, textarea {
      background: #222a3a;
      color: var(--ink);
      border: 1px solid #303a4f;
      border-radius: 10px;
      padding: 9px 12px;
      font-size: 0.95rem;
    }

    button { cursor: pointer; border-color: transparent; }
    button.primary { background: var(--accent); color: #05130a; font-weight: 600; }
    button.danger { background: transparent; color: var(--bad); }

    table { border-collapse: collapse; width: 100%; overflow-x: auto; display: block; }
    th, td { border: 1px solid #2a3346; padding: 4px 6px; text-align: center; font-size: 0.8rem; }
    th.habit, td.habit { text-align: left; min-width: 120px; }

    .bars { display: flex; gap: 4px; align-items: flex-end; height: 90px; }
    .bar { flex: 1; background: #2a3346; border-radius: 4px 4px 0 0; position: relative; }
    .bar-fill { position: absolute; bottom: 0; width: 100%; border-radius: 4px 4px 0 0; background: var(--accent); }
    .bar-fill.red { background: var(--bad); }
    .bar-fill.yellow { background: var(--warn); }
    .bar-fill.green { background: var(--accent); }

    ul { list-style: none; padding: 0; margin: 0; }
    li { display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid #232c3e; }

    #chatBox {
      display: flex; flex-direction: column; gap: 8px;
      max-height: 260px; overflow-y: auto; margin-bottom: 10px;
    }
    .msg { padding: 10px 12px; border-radius: 12px; max-width: 80%; white-space: pre-line; }
    .msg.bot { background: #222a3a; border-left: 4px solid var(--accent); align-self: flex-start; }
    .msg.user { background: var(--accent); color: #05130a; font-weight: 600; align-self: flex-end; }

    .notice { color: var(--muted); font-size: 0.85rem; }
    .hidden { display: none; }
    .streak { color: var(--accent); font-weight: 700; }
  </style>
</head>
<body>
  <h1>Habit Buddy</h1>

  <section id="authCard" class="card">
    <h2>Sign in</h2>
    <div class="row">
      <input id="username" placeholder="username" />
      <input id="password" type="password" placeholder="password" />
      <button class="primary" onclick="login()">Log in</button>
      <button onclick="signup()">Sign up</button>
      <button onclick="resetPassword()">Reset password</button>
    </div>
    <p id="authNotice" class="notice"></p>
  </section>

  <main id="appMain" class="hidden">
    <section class="card">
      <div class="row">
        <span id="whoami" class="notice"></span>
        <span id="todayLabel" class="notice"></span>
        <select id="monthSelect"></select>
        <select id="yearSelect"></select>
        <label class="notice"><input type="checkbox" id="voiceToggle" /> voice</label>
        <a id="reportLink" href="/api/report" target="_blank">Report</a>
        <button class="danger" onclick="logout()">Log out</button>
      </div>
    </section>

    <section class="card">
      <h2>Habits</h2>
      <div class="row">
        <input id="habitInput" placeholder="new habit" />
        <button class="primary" onclick="addHabit()">Add</button>
      </div>
      <ul id="habitList"></ul>
    </section>

    <section class="card">
      <h2>Monthly grid</h2>
      <table id="grid"></table>
    </section>

    <section class="card">
      <h2>Daily progress</h2>
      <div id="dailyBars" class="bars"></div>
    </section>

    <section class="card">
      <h2>Weekly efficiency</h2>
      <div id="weeklyBars" class="bars"></div>
    </section>

    <section class="card">
      <h2>Top habits</h2>
      <ul id="topHabits"></ul>
    </section>

    <section class="card">
      <h2>Body metrics</h2>
      <div class="row">
        <input id="height" type="number" placeholder="height cm" />
        <input id="weight" type="number" placeholder="weight kg" />
        <input id="age" type="number" placeholder="age" />
        <select id="sex">
          <option value="male">male</option>
          <option value="female">female</option>
        </select>
        <select id="activity">
          <option value="sedentary">sedentary (1.2)</option>
          <option value="light">light (1.375)</option>
          <option value="moderate">moderate (1.55)</option>
          <option value="very_active">very active (1.725)</option>
        </select>
        <button class="primary" onclick="saveMetrics()">Calculate</button>
      </div>
      <p id="metricsOut" class="notice"></p>
    </section>

    <section class="card">
      <h2>Trainer</h2>
      <div id="chatBox"></div>
      <div class="row">
        <input id="chatInput" placeholder="ask about workout, diet, habits..." style="flex:1" />
        <select id="langSelect">
          <option value="en">English</option>
          <option value="hi">हिंदी</option>
          <option value="mr">मराठी</option>
        </select>
        <button class="primary" onclick="sendChat()">Send</button>
      </div>
    </section>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);
    const now = new Date();

    const api = async (path, options = {}) => {
      const response = await fetch(path, {
        headers: { "Content-Type": "application/json" },
        ...options,
      });
      if (!response.ok) throw new Error(await response.text());
      const type = response.headers.get("content-type") || "";
      return type.includes("json") ? response.json() : response.text();
    };

    const selectedMonth = () => ({
      year: Number($("yearSelect").value),
      month: Number($("monthSelect").value),
    });

    async function signup() {
      try {
        await api("/api/signup", { method: "POST", body: JSON.stringify({
          username: $("username").value, password: $("password").value }) });
        $("authNotice").textContent = "Account created. Log in to continue.";
      } catch (err) { $("authNotice").textContent = err.message; }
    }

    async function login() {
      try {
        await api("/api/login", { method: "POST", body: JSON.stringify({
          username: $("username").value, password: $("password").value }) });
        await enterApp();
      } catch (err) { $("authNotice").textContent = err.message; }
    }

    async function resetPassword() {
      const newPassword = prompt("New password:");
      if (!newPassword) return;
      try {
        await api("/api/reset-password", { method: "POST", body: JSON.stringify({
          username: $("username").value, new_password: newPassword }) });
        $("authNotice").textContent = "Password reset. Log in with the new password.";
      } catch (err) { $("authNotice").textContent = err.message; }
    }

    async function logout() {
      await api("/api/logout", { method: "POST" });
      $("appMain").classList.add("hidden");
      $("authCard").classList.remove("hidden");
    }

    async function enterApp() {
      const session = await api("/api/session");
      $("whoami").textContent = session.username;
      $("authCard").classList.add("hidden");
      $("appMain").classList.remove("hidden");
      const voice = await api("/api/voice");
      $("voiceToggle").checked = voice.enabled;
      await Promise.all([refreshHabits(), refreshMonth(), refreshChat(), refreshMetrics()]);
    }

    async function refreshHabits() {
      const habits = await api("/api/habits");
      $("habitList").innerHTML = habits.map(h =>
        `<li><span>${h.name} <span class="streak">&#128293; ${h.streak}</span></span>
         <button class="danger" onclick="deleteHabit(${h.id}, '${h.name.replace(/'/g, "\\'")}')">&#10005;</button></li>`
      ).join("");
    }

    async function addHabit() {
      const name = $("habitInput").value;
      if (!name.trim()) return;
      try {
        await api("/api/habits", { method: "POST", body: JSON.stringify({ name }) });
        $("habitInput").value = "";
        await Promise.all([refreshHabits(), refreshMonth()]);
      } catch (err) { alert(err.message); }
    }

    async function deleteHabit(id, name) {
      if (!confirm(`Delete "${name}"?`)) return;
      await api(`/api/habits/${id}`, { method: "DELETE" });
      await Promise.all([refreshHabits(), refreshMonth()]);
    }

    async function toggleMark(day, habitId, done) {
      const { year, month } = selectedMonth();
      const result = await api("/api/marks", { method: "POST", body: JSON.stringify({
        year, month, day, habit_id: habitId, done }) });
      if (result.celebrate) launchConfetti();
      await Promise.all([refreshHabits(), refreshMonth()]);
    }

    async function refreshMonth() {
      const { year, month } = selectedMonth();
      const view = await api(`/api/month?year=${year}&month=${month}`);

      let head = "<tr><th class='habit'>Habits</th>";
      for (let d = 1; d <= view.days_in_month; d++) head += `<th>${d}</th>`;
      head += "</tr><tr><th class='habit'></th>" +
        view.weekdays.map(w => `<th>${w}</th>`).join("") + "</tr>";

      const rows = view.rows.map(row =>
        `<tr><td class="habit">${row.name}</td>` + row.marks.map((done, i) =>
          `<td><input type="checkbox" ${done ? "checked" : ""}
            onchange="toggleMark(${i + 1}, ${row.id}, this.checked)" /></td>`
        ).join("") + "</tr>"
      ).join("");
      $("grid").innerHTML = head + rows;

      $("dailyBars").innerHTML = view.daily_percent.map(pct =>
        `<div class="bar" title="${pct.toFixed(0)}%"><div class="bar-fill" style="height:${pct}%"></div></div>`
      ).join("");

      $("weeklyBars").innerHTML = view.weekly.map(w =>
        `<div class="bar" title="Week ${w.week}: ${w.percent.toFixed(0)}%">
          <div class="bar-fill ${w.tier}" style="height:${w.percent}%"></div></div>`
      ).join("");

      $("topHabits").innerHTML = view.top_habits.map(h =>
        `<li><span>${h.name}</span><strong>${h.percent.toFixed(0)}%</strong></li>`
      ).join("");

      $("todayLabel").textContent =
        `${view.today.done} / ${view.today.total} tasks today (${view.today.percent.toFixed(0)}%)`;
    }

    async function refreshMetrics() {
      try {
        const m = await api("/api/metrics");
        $("height").value = m.height_cm; $("weight").value = m.weight_kg;
        $("age").value = m.age; $("sex").value = m.sex; $("activity").value = m.activity;
        showMetrics(m);
      } catch { /* none recorded yet */ }
    }

    async function saveMetrics() {
      try {
        const m = await api("/api/metrics", { method: "POST", body: JSON.stringify({
          height_cm: Number($("height").value),
          weight_kg: Number($("weight").value),
          age: Number($("age").value),
          sex: $("sex").value,
          activity: $("activity").value }) });
        showMetrics(m);
      } catch (err) { $("metricsOut").textContent = err.message; }
    }

    function showMetrics(m) {
      $("metricsOut").textContent =
        `BMI ${m.bmi.toFixed(1)} (${m.category}) | BMR ${Math.round(m.bmr)} | ` +
        `${Math.round(m.calories)} kCal/day | body fat ${m.body_fat_percent.toFixed(1)}%`;
    }

    async function refreshChat() {
      const history = await api("/api/chat");
      const box = $("chatBox");
      box.innerHTML = history.map(m => `<div class="msg ${m.role}"></div>`).join("");
      [...box.children].forEach((div, i) => { div.textContent = history[i].text; });
      box.scrollTop = box.scrollHeight;
    }

    async function sendChat() {
      const message = $("chatInput").value.trim();
      if (!message) return;
      $("chatInput").value = "";
      const result = await api("/api/chat", { method: "POST", body: JSON.stringify({
        message, lang: $("langSelect").value }) });
      await refreshChat();
      if ($("voiceToggle").checked && "speechSynthesis" in window) {
        const utterance = new SpeechSynthesisUtterance(result.reply);
        utterance.lang = $("langSelect").value === "en" ? "en-IN" : "hi-IN";
        speechSynthesis.speak(utterance);
      }
    }

    function launchConfetti() {
      const emojis = ["\u{1F525}", "\u2B50", "\u{1F4AA}", "\u2728", "\u2705"];
      for (let i = 0; i < 20; i++) {
        const piece = document.createElement("div");
        piece.textContent = emojis[Math.floor(Math.random() * emojis.length)];
        piece.style.cssText = `position:fixed; left:${Math.random() * 100}vw; top:-5vh;` +
          "font-size:2rem; z-index:9999; pointer-events:none; transition:transform 2s ease-out, opacity 2s;";
        document.body.appendChild(piece);
        setTimeout(() => {
          piece.style.transform = `translateY(110vh) rotate(${Math.random() * 360}deg)`;
          piece.style.opacity = "0";
        }, 10);
        setTimeout(() => piece.remove(), 2000);
      }
    }

    function initSelectors() {
      const months = ["Jan","Feb","Mar","Apr","May","Jun","Jul","Aug","Sep","Oct","Nov","Dec"];
      $("monthSelect").innerHTML = months.map((m, i) => `<option value="${i + 1}">${m}</option>`).join("");
      let years = "";
      for (let y = now.getFullYear() - 2; y <= now.getFullYear() + 2; y++) {
        years += `<option value="${y}">${y}</option>`;
      }
      $("yearSelect").innerHTML = years;
      $("monthSelect").value = now.getMonth() + 1;
      $("yearSelect").value = now.getFullYear();
      $("monthSelect").onchange = refreshMonth;
      $("yearSelect").onchange = refreshMonth;
      $("voiceToggle").onchange = () => api("/api/voice", { method: "POST",
        body: JSON.stringify({ enabled: $("voiceToggle").checked }) });
      $("chatInput").onkeydown = (e) => { if (e.key === "Enter") sendChat(); };
      $("habitInput").onkeydown = (e) => { if (e.key === "Enter") addHabit(); };
    }

    initSelectors();
    api("/api/session").then(enterApp).catch(() => {});
  </script>
</body>
</html>
"#;
