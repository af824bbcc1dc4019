//! The built-in language table

use super::profile::LanguageProfile;
use super::AUTO_TAG;

/// Every shipped profile, in registration order; the default comes last
pub fn builtin_profiles() -> Vec<LanguageProfile> {
    vec![
        LanguageProfile::new("ko", "한국어 (Korean)", &["pusan", "daum"], "95%")
            .with_detector_tags(&["kor"]),
        LanguageProfile::new("ja", "日本語 (Japanese)", &["enno"], "92%")
            .with_detector_tags(&["jpn"]),
        LanguageProfile::new("zh", "中文 (Chinese)", &["manfen"], "90%")
            .with_detector_tags(&["cmn", "zh-cn", "zh-tw"]),
        LanguageProfile::new("de", "Deutsch (German)", &["rechtschreibung24"], "89%")
            .with_detector_tags(&["deu"]),
        LanguageProfile::new("ru", "Русский (Russian)", &["prcy"], "87%")
            .with_detector_tags(&["rus"]),
        LanguageProfile::new("en", "English", &["grammarbot", "languagetool"], "94%")
            .with_detector_tags(&["eng"]),
        LanguageProfile::new("es", "Español (Spanish)", &["languagetool"], "85%")
            .with_detector_tags(&["spa"]),
        LanguageProfile::new("fr", "Français (French)", &["languagetool"], "85%")
            .with_detector_tags(&["fra"]),
        LanguageProfile::new("it", "Italiano (Italian)", &["languagetool"], "85%")
            .with_detector_tags(&["ita"]),
        LanguageProfile::new("pt", "Português (Portuguese)", &["languagetool"], "85%")
            .with_detector_tags(&["por"]),
        LanguageProfile::new("nl", "Nederlands (Dutch)", &["languagetool"], "83%")
            .with_detector_tags(&["nld"]),
        LanguageProfile::new("pl", "Polski (Polish)", &["languagetool"], "83%")
            .with_detector_tags(&["pol"]),
        LanguageProfile::new("ar", "العربية (Arabic)", &["languagetool"], "75%")
            .with_detector_tags(&["ara"]),
        LanguageProfile::new("cy", "Cymraeg (Welsh)", &["languagetool"], "70%")
            .with_detector_tags(&["cym"]),
        LanguageProfile::new("af", "Afrikaans", &["languagetool"], "70%")
            .with_detector_tags(&["afr"]),
        LanguageProfile::new("kk", "Қазақша (Kazakh)", &["languagetool"], "65%")
            .with_detector_tags(&["kaz"]),
        LanguageProfile::new("uz", "O'zbek (Uzbek)", &["languagetool"], "65%")
            .with_detector_tags(&["uzb"]),
        LanguageProfile::new(AUTO_TAG, "Auto-detect (multilingual)", &["languagetool"], "80%"),
    ]
}
