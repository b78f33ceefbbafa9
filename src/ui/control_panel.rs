//! Bundled control panel served at `tabshell://localhost/control`.

/// Injected into the control surface before any page script runs.
///
/// `window.tabshell.send(kind, payload)` posts a `{kind, payload}` envelope to
/// the host; `window.tabshell.on(kind, cb)` subscribes to host pushes.
pub const CONTROL_BRIDGE_JS: &str = r#"
(function () {
  if (window.tabshell) return;
  var handlers = {};
  window.tabshell = {
    send: function (kind, payload) {
      var msg = { kind: kind };
      if (payload !== undefined) msg.payload = payload;
      window.ipc.postMessage(JSON.stringify(msg));
    },
    on: function (kind, cb) {
      (handlers[kind] = handlers[kind] || []).push(cb);
    },
    _dispatch: function (msg) {
      (handlers[msg.kind] || []).forEach(function (cb) {
        try { cb(msg.payload); } catch (e) { console.error(e); }
      });
    }
  };
})();
"#;

pub const CONTROL_PANEL_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Tabshell</title>
<style>
  body { margin: 0; font: 13px system-ui, sans-serif; background: #e8e8ec; user-select: none; }
  #tabs { display: flex; gap: 2px; padding: 6px 6px 0; overflow-x: auto; }
  .tab { display: flex; align-items: center; gap: 6px; max-width: 200px; padding: 6px 10px;
         background: #d4d4da; border-radius: 6px 6px 0 0; cursor: default; }
  .tab.active { background: #fff; }
  .tab img { width: 16px; height: 16px; }
  .tab .title { overflow: hidden; white-space: nowrap; text-overflow: ellipsis; flex: 1; }
  .tab .close { border: none; background: none; cursor: pointer; }
  #bar { display: flex; gap: 4px; padding: 6px; background: #fff; }
  #bar button { min-width: 28px; }
  #address { flex: 1; padding: 4px 8px; }
</style>
</head>
<body>
<div id="tabs"></div>
<form id="bar">
  <button type="button" id="back" title="Back">&#8592;</button>
  <button type="button" id="forward" title="Forward">&#8594;</button>
  <button type="button" id="reload" title="Reload">&#8635;</button>
  <input id="address" autocomplete="off" spellcheck="false">
  <button type="button" id="new" title="New tab">+</button>
</form>
<script>
  var state = { confs: {}, tabs: [], active: null };
  var tabs = document.getElementById('tabs');
  var address = document.getElementById('address');

  function render() {
    tabs.textContent = '';
    state.tabs.forEach(function (id) {
      var conf = state.confs[id] || {};
      var el = document.createElement('div');
      el.className = 'tab' + (id === state.active ? ' active' : '');
      if (conf.favicon) {
        var icon = document.createElement('img');
        icon.src = conf.favicon;
        el.appendChild(icon);
      }
      var title = document.createElement('span');
      title.className = 'title';
      title.textContent = (conf.isLoading ? '⌛ ' : '') + (conf.title || conf.url || '');
      el.appendChild(title);
      var close = document.createElement('button');
      close.className = 'close';
      close.textContent = '×';
      close.onclick = function (e) { e.stopPropagation(); tabshell.send('close-tab', { tabId: id }); };
      el.appendChild(close);
      el.onclick = function () { tabshell.send('switch-tab', { tabId: id }); };
      tabs.appendChild(el);
    });
    var active = state.confs[state.active] || {};
    if (document.activeElement !== address) address.value = active.url || '';
    document.getElementById('back').disabled = !active.canGoBack;
    document.getElementById('forward').disabled = !active.canGoForward;
  }

  tabshell.on('tabs-update', function (snapshot) {
    state.confs = snapshot.confs;
    state.tabs = snapshot.tabs;
    render();
  });
  tabshell.on('active-update', function (id) {
    state.active = id;
    render();
  });

  document.getElementById('back').onclick = function () { tabshell.send('act', { action: 'goBack' }); };
  document.getElementById('forward').onclick = function () { tabshell.send('act', { action: 'goForward' }); };
  document.getElementById('reload').onclick = function () { tabshell.send('act', { action: 'reload' }); };
  document.getElementById('new').onclick = function () { tabshell.send('new-tab', {}); };
  address.oninput = function () { tabshell.send('url-change', { url: address.value }); };
  document.getElementById('bar').onsubmit = function (e) {
    e.preventDefault();
    var url = address.value.trim();
    if (url && !/^[a-z][a-z0-9+.-]*:/i.test(url)) url = 'https://' + url;
    tabshell.send('url-enter', { url: url });
    address.blur();
  };

  tabshell.send('control-ready');
</script>
</body>
</html>
"#;
