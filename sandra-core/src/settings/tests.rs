use crate::settings::manager::SettingsManager;
use crate::settings::Settings;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_creates_default_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("nested").join("settings.toml");

    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();

    assert!(settings_path.exists());
    assert_eq!(manager.settings(), Settings::default());
    assert_eq!(manager.path(), settings_path.as_path());
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &settings_path,
        "[voice]\nvoice_name = \"Puck\"\nmuted = true\n",
    )
    .unwrap();

    let settings = SettingsManager::from_path(settings_path)
        .unwrap()
        .settings();

    assert_eq!(settings.voice.voice_name, "Puck");
    assert!(settings.voice.muted);
    assert_eq!(settings.voice.default_sample_rate, 16000);
    assert_eq!(settings.voice.language, "es-ES");
    assert_eq!(settings.gemini.tts_model, "gemini-2.5-flash-preview-tts");
    assert_eq!(settings.gemini.stt_model, "gemini-2.5-flash-preview-05-20");
    assert_eq!(settings.stt_config().model, settings.gemini.stt_model);
}

#[test]
fn test_corrupt_file_is_backed_up() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(&settings_path, "this is [not toml").unwrap();

    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();

    assert_eq!(manager.settings(), Settings::default());
    let backup = temp_dir.path().join("settings.toml.backup");
    assert_eq!(
        std::fs::read_to_string(backup).unwrap(),
        "this is [not toml"
    );
    let rewritten: Settings =
        toml::from_str(&std::fs::read_to_string(settings_path).unwrap()).unwrap();
    assert_eq!(rewritten, Settings::default());
}

#[test]
fn test_update_is_in_memory_until_saved() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();

    manager.update_setting(|s| s.voice.muted = true);
    assert!(manager.settings().voice.muted);
    let on_disk = SettingsManager::from_path(settings_path.clone()).unwrap();
    assert!(!on_disk.settings().voice.muted);

    manager.save().unwrap();
    let reloaded = SettingsManager::from_path(settings_path).unwrap();
    assert!(reloaded.settings().voice.muted);
}

#[test]
fn test_api_key_resolution() {
    let mut settings = Settings::default();
    assert_eq!(settings.resolve_api_key(None), None);
    assert_eq!(settings.resolve_api_key(Some("  ".to_string())), None);
    assert_eq!(
        settings.resolve_api_key(Some("env-key".to_string())),
        Some("env-key".to_string())
    );

    settings.gemini.api_key = "file-key".to_string();
    assert_eq!(
        settings.resolve_api_key(Some("env-key".to_string())),
        Some("file-key".to_string())
    );
}

#[test]
fn test_derived_provider_configs() {
    let mut settings = Settings::default();
    settings.gemini.timeout_secs = 5;
    settings.voice.default_sample_rate = 24000;
    settings.chat.system_prompt = Some("Eres un conserje.".to_string());
    settings.chat.output_dir = Some(PathBuf::from("/tmp/sandra-audio"));

    let gemini = settings.gemini_config("k".to_string());
    assert_eq!(gemini.timeout.as_secs(), 5);
    assert_eq!(gemini.api_key, "k");

    let tts = settings.tts_config();
    assert_eq!(tts.default_sample_rate, 24000);
    assert_eq!(tts.voice_name, "Kore");

    let options = settings.session_options();
    assert_eq!(options.system_prompt, "Eres un conserje.");
    assert_eq!(settings.output_dir(), PathBuf::from("/tmp/sandra-audio"));
}
