use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the knowledge base under the qubit home directory
pub const KB_FILE: &str = "knowledge_base.json";

/// Get the qubit data directory, respecting the QUBIT_HOME override
pub fn qubit_home() -> PathBuf {
  if let Ok(root) = env::var("QUBIT_HOME") {
    PathBuf::from(root)
  } else {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".qubit")
  }
}

/// Default location of the knowledge base file
pub fn kb_path() -> PathBuf {
  qubit_home().join(KB_FILE)
}

/// One topic and the ordered fixes recorded for it
#[derive(Debug, Clone, PartialEq)]
pub struct TopicEntry {
  pub topic: String,
  pub solutions: Vec<String>,
}

/// Topic-keyed collection of troubleshooting solutions.
///
/// Topics keep their insertion order, and the JSON file round-trips in
/// that same order. Ranking relies on this: topics that tie on score
/// stay in catalog order rather than jumping around between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
  entries: Vec<TopicEntry>,
}

impl KnowledgeBase {
  pub fn new() -> Self {
    Self { entries: Vec::new() }
  }

  /// Insert or replace a topic. Replacing keeps the topic's original position.
  pub fn insert(&mut self, topic: impl Into<String>, solutions: Vec<String>) {
    let topic = topic.into();
    match self.entries.iter_mut().find(|e| e.topic == topic) {
      Some(entry) => entry.solutions = solutions,
      None => self.entries.push(TopicEntry { topic, solutions }),
    }
  }

  /// Exact lookup by topic label
  pub fn get(&self, topic: &str) -> Option<&[String]> {
    self.entries.iter().find(|e| e.topic == topic).map(|e| e.solutions.as_slice())
  }

  /// Case-insensitive lookup for interactive use
  pub fn find(&self, topic: &str) -> Option<&TopicEntry> {
    let needle = topic.trim().to_lowercase();
    self.entries.iter().find(|e| e.topic.to_lowercase() == needle)
  }

  pub fn topics(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|e| e.topic.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.entries.iter().map(|e| (e.topic.as_str(), e.solutions.as_slice()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Load a knowledge base from a specific file
  pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = fs::read_to_string(&path)
      .with_context(|| format!("Failed to read knowledge base: {}", path.as_ref().display()))?;

    let kb: KnowledgeBase = serde_json::from_str(&content)
      .with_context(|| format!("Failed to parse knowledge base: {}", path.as_ref().display()))?;

    Ok(kb)
  }

  /// Load from `path`, falling back to the built-in catalog.
  ///
  /// A missing file means a fresh install, so no complaint. A broken one
  /// is logged and the built-in catalog keeps the assistant answering.
  pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> Self {
    let path = path.as_ref();
    if path.exists() {
      match Self::load_from(path) {
        Ok(kb) => return kb,
        Err(e) => warn!("knowledge base load failed: {e}"),
      }
    }
    Self::builtin()
  }

  /// Save the knowledge base, creating parent directories as needed
  pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
      fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(self).context("Failed to serialize knowledge base")?;

    fs::write(&path, content)
      .with_context(|| format!("Failed to write knowledge base: {}", path.as_ref().display()))?;

    Ok(())
  }

  /// The catalog the assistant ships with
  pub fn builtin() -> Self {
    let mut kb = Self::new();

    // Digital / IT
    seed(&mut kb, "password reset", &[
      "Click **Forgot Password** on the login page.",
      "If 2FA is enabled, approve the push request.",
      "Contact IT if reset email not received within 15 minutes.",
      "⚠️ Error: *Reset link expired* → Request again with fresh link",
      "Check spam/junk folder for reset emails",
    ]);
    seed(&mut kb, "slow computer", &[
      "Restart & close heavy applications using Task Manager",
      "Run a malware scan with Windows Defender or third-party antivirus",
      "Check **Task Manager** for high CPU/memory processes",
      "Upgrade to SSD for significant speed improvement",
      "Clear temporary files with Disk Cleanup utility",
      "Disable unnecessary startup programs",
    ]);
    seed(&mut kb, "wifi not connecting", &[
      "Toggle Airplane mode or reboot router and modem",
      "Forget network and reconnect with correct credentials",
      "Check if DHCP is enabled in network adapter settings",
      "Error: *IP address conflict* – renew IP via command prompt: ipconfig /release then ipconfig /renew",
      "Update network adapter drivers from manufacturer website",
      "Check router firmware updates",
    ]);
    seed(&mut kb, "bluetooth issue", &[
      "Turn off/on Bluetooth from system tray or settings",
      "Remove & re-pair device in Bluetooth settings",
      "Update drivers from Device Manager (devmgmt.msc)",
      "Run Bluetooth troubleshooter in Windows Settings",
      "Check if device is in pairing mode and discoverable",
    ]);
    seed(&mut kb, "printer offline", &[
      "Ensure printer & PC are on same network (check IP addresses)",
      "Restart Print Spooler service (services.msc → Spooler)",
      "Re-install latest drivers from manufacturer website",
      "Check printer status on physical display for errors",
      "Clear print queue and restart printing",
    ]);
    seed(&mut kb, "excel formula error", &[
      "Check `=` sign at start of formula entry",
      "Use absolute refs `$A$1` if copying formula across cells",
      "Error: `#VALUE!` – check for wrong data types in referenced cells",
      "Error: `#REF!` – referenced cells may have been deleted",
      "Use Formula Auditing tools to trace precedents/dependents",
      "Wrap complex formulas with IFERROR for cleaner sheets",
    ]);
    seed(&mut kb, "zoom mic not working", &[
      "Check mute button & OS mic permissions in Sound Settings",
      "Choose correct audio device in Zoom settings → Audio",
      "Restart audio service (services.msc → Windows Audio)",
      "Test microphone in Windows Sound Settings → Input",
      "Check if Zoom has audio permissions in browser/app settings",
    ]);

    // Mobile / day-to-day
    seed(&mut kb, "phone overheating", &[
      "Close unused apps running in background",
      "Remove case while charging to improve heat dissipation",
      "Avoid gaming or video streaming while charging",
      "Check for software updates that may address thermal management",
      "Reduce screen brightness and timeout settings",
    ]);
    seed(&mut kb, "camera blurry", &[
      "Clean lens with microfiber cloth (no liquids directly on lens)",
      "Disable beauty filter or other enhancement features",
      "Reset camera settings to default and retest",
      "Check for protective film or case obstructing lens",
      "Test in different lighting conditions - low light often causes blur",
    ]);
    seed(&mut kb, "battery drains fast", &[
      "Reduce screen brightness and enable adaptive brightness",
      "Disable GPS, Bluetooth, and WiFi when not in use",
      "Check battery health in settings (usually under Battery section)",
      "Identify battery-hungry apps in Battery Usage settings",
      "Enable battery saver mode during critical times",
      "Consider battery replacement if health is below 80%",
    ]);

    // Work / productivity
    seed(&mut kb, "outlook not syncing", &[
      "Restart Outlook in safe mode: outlook.exe /safe",
      "Clear cached credentials in Credential Manager",
      "Check server status at `status.office.com`",
      "Rebuild OST/PST files if corrupted (may require admin help)",
      "Check mailbox size limits and archive old items",
    ]);
    seed(&mut kb, "vpn not connecting", &[
      "Verify login credentials and network connectivity",
      "Restart VPN client service or reinstall client software",
      "Error: `TLS handshake failed` – update VPN client to latest version",
      "Check firewall settings aren't blocking VPN connection",
      "Try different VPN protocols (e.g., switch from UDP to TCP)",
    ]);
    seed(&mut kb, "remote desktop lag", &[
      "Lower display resolution and color depth in RDP settings",
      "Disable printer/clipboard sharing to reduce bandwidth",
      "Use wired network connection instead of WiFi",
      "Check resource usage on both local and remote machines",
      "Adjust experience settings to match connection speed",
    ]);

    // Dev
    seed(&mut kb, "python import error", &[
      "Activate correct virtual environment for your project",
      "Check `PYTHONPATH` environment variable and package installation",
      "Error: `ModuleNotFoundError` → pip install the missing package",
      "Check for circular imports in your code structure",
      "Verify file __init__.py exists in package directories",
      "Consider using conda environments for complex scientific packages",
    ]);
    seed(&mut kb, "git merge conflict", &[
      "Run `git status` to see conflicted files",
      "Edit each file to keep correct code segments (look for conflict markers)",
      "Stage resolved files with `git add <filename>`",
      "Commit resolved files with `git commit -m 'Merge conflict resolution'`",
      "Use visual tools like VS Code's merge conflict editor or git mergetool",
      "For complex conflicts, consider aborting merge and rebasing instead",
    ]);
    seed(&mut kb, "docker build failed", &[
      "Check Dockerfile syntax and base image references",
      "Increase disk space with `docker system prune`",
      "Error: `no space left on device` → prune images, containers, and volumes",
      "Check build context doesn't include unnecessary large files",
      "Use multi-stage builds to reduce final image size",
      "Review layer caching to optimize build process",
    ]);

    // OS / files
    seed(&mut kb, "disk space low", &[
      "Empty recycle bin/trash and temporary files (%temp%)",
      "Uninstall unused applications via Settings → Apps",
      "Move large files to cloud storage or external drives",
      "Use Storage Sense in Windows to automatically free space",
      "Analyze disk usage with tools like WinDirStat or TreeSize",
      "Clear browser caches and downloaded files",
    ]);
    seed(&mut kb, "file permission denied", &[
      "Run as Administrator (right-click → Run as Administrator)",
      "Change file ownership in Properties → Security → Advanced",
      "On Linux use `sudo chmod` or `sudo chown` commands",
      "Check if file is in use by another process or application",
      "Take ownership of files/folders with administrative privileges",
    ]);

    // Security and stability
    seed(&mut kb, "email hacked", &[
      "Immediately change password and enable 2-factor authentication",
      "Check recent activity for suspicious logins",
      "Revoke access to suspicious third-party apps",
      "Scan device for malware/keyloggers",
      "Notify contacts about potential compromise",
      "Set up account recovery options",
    ]);
    seed(&mut kb, "software crashing", &[
      "Update to latest version of the software",
      "Check compatibility with your operating system version",
      "Reinstall the application to fix corrupted files",
      "Check event viewer for specific error codes",
      "Run in compatibility mode if recently upgraded OS",
    ]);
    seed(&mut kb, "no internet connection", &[
      "Reboot modem and router (unplug for 30 seconds)",
      "Check physical connections and cables",
      "Test with multiple devices to isolate problem",
      "Contact ISP to check for outages in your area",
      "Reset network stack with command: netsh winsock reset",
    ]);

    kb
  }
}

fn seed(kb: &mut KnowledgeBase, topic: &str, solutions: &[&str]) {
  kb.insert(topic, solutions.iter().map(|s| s.to_string()).collect());
}

impl Serialize for KnowledgeBase {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for entry in &self.entries {
      map.serialize_entry(&entry.topic, &entry.solutions)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for KnowledgeBase {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct KbVisitor;

    impl<'de> Visitor<'de> for KbVisitor {
      type Value = KnowledgeBase;

      fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of topic labels to solution lists")
      }

      fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
      where
        A: MapAccess<'de>,
      {
        let mut kb = KnowledgeBase::new();
        while let Some((topic, solutions)) = access.next_entry::<String, Vec<String>>()? {
          kb.insert(topic, solutions);
        }
        Ok(kb)
      }
    }

    deserializer.deserialize_map(KbVisitor)
  }
}
