//! Reload client injected into the background entry.

/// Client body. Connects to the reload channel and reloads the extension on
/// every `update` message.
const RELOAD_CLIENT: &str = r#"
function __crxReload(host, port) {
  const socket = new WebSocket("ws://" + host + ":" + port);
  socket.addEventListener("message", function (event) {
    __crxHandleMessage(JSON.parse(event.data));
  });
}

function __crxHandleMessage(payload) {
  switch (payload.type) {
    case "connected":
      console.log("[crx] connected.");
      break;
    case "update":
      chrome.runtime.reload();
      break;
    default:
      break;
  }
}
"#;

/// JavaScript snippet that connects back to `host:port`.
///
/// ```
/// let snippet = crx_bundler::reload_client_snippet("localhost", 3060);
/// assert!(snippet.trim_end().ends_with(r#"__crxReload("localhost", 3060);"#));
/// ```
pub fn reload_client_snippet(host: &str, port: u16) -> String {
    // JSON string literals are valid JavaScript string literals
    let host = serde_json::Value::from(host).to_string();
    format!("{RELOAD_CLIENT}\n__crxReload({host}, {port});\n")
}
