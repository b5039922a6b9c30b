//! Fixed interface labels in the five supported languages

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
    Zh,
    De,
    Tr,
}

impl Locale {
    pub const ALL: [Locale; 5] = [Locale::En, Locale::Ru, Locale::Zh, Locale::De, Locale::Tr];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
            Locale::Zh => "zh",
            Locale::De => "de",
            Locale::Tr => "tr",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ru => "Русский",
            Locale::Zh => "中文",
            Locale::De => "Deutsch",
            Locale::Tr => "Türkçe",
        }
    }

    /// The next language in the selector, wrapping around.
    pub fn cycle(&self) -> Locale {
        let index = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.split(['-', '_', '.']).next().unwrap_or_default().to_lowercase();
        Locale::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| format!("unsupported language '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    SiteName,
    Search,
    Login,
    Logout,
    Subscribe,
    Tags,
    AddVideo,
    Previous,
    Next,
    LoginTitle,
    RegisterTitle,
    Username,
    Password,
    LoginButton,
    RegisterButton,
    Back,
    SubscribeRequired,
    SubscribeMessage,
    AdminPanel,
    VideoTitle,
    ExternalUrl,
    Image1,
    Image2,
    Image3,
    Save,
    Cancel,
    NoResults,
}

/// Look up a label in the given language.
pub fn t(locale: Locale, label: Label) -> &'static str {
    use Label::*;
    match locale {
        Locale::En => match label {
            SiteName => "VideoHub",
            Search => "Search videos...",
            Login => "Login",
            Logout => "Logout",
            Subscribe => "Subscribe",
            Tags => "Tags",
            AddVideo => "Add video",
            Previous => "Previous",
            Next => "Next",
            LoginTitle => "Sign in",
            RegisterTitle => "Create account",
            Username => "Username",
            Password => "Password",
            LoginButton => "Sign in",
            RegisterButton => "Register",
            Back => "Back",
            SubscribeRequired => "Subscription required",
            SubscribeMessage => "Log in or subscribe to watch this video.",
            AdminPanel => "Admin panel",
            VideoTitle => "Title",
            ExternalUrl => "External URL",
            Image1 => "Image 1 URL",
            Image2 => "Image 2 URL",
            Image3 => "Image 3 URL",
            Save => "Save",
            Cancel => "Cancel",
            NoResults => "No videos found",
        },
        Locale::Ru => match label {
            SiteName => "VideoHub",
            Search => "Поиск видео...",
            Login => "Войти",
            Logout => "Выйти",
            Subscribe => "Подписаться",
            Tags => "Теги",
            AddVideo => "Добавить видео",
            Previous => "Назад",
            Next => "Вперёд",
            LoginTitle => "Вход",
            RegisterTitle => "Регистрация",
            Username => "Имя пользователя",
            Password => "Пароль",
            LoginButton => "Войти",
            RegisterButton => "Зарегистрироваться",
            Back => "Назад",
            SubscribeRequired => "Нужна подписка",
            SubscribeMessage => "Войдите или оформите подписку, чтобы смотреть видео.",
            AdminPanel => "Панель администратора",
            VideoTitle => "Название",
            ExternalUrl => "Внешняя ссылка",
            Image1 => "Изображение 1",
            Image2 => "Изображение 2",
            Image3 => "Изображение 3",
            Save => "Сохранить",
            Cancel => "Отмена",
            NoResults => "Видео не найдены",
        },
        Locale::Zh => match label {
            SiteName => "VideoHub",
            Search => "搜索视频...",
            Login => "登录",
            Logout => "退出",
            Subscribe => "订阅",
            Tags => "标签",
            AddVideo => "添加视频",
            Previous => "上一页",
            Next => "下一页",
            LoginTitle => "登录",
            RegisterTitle => "注册",
            Username => "用户名",
            Password => "密码",
            LoginButton => "登录",
            RegisterButton => "注册",
            Back => "返回",
            SubscribeRequired => "需要订阅",
            SubscribeMessage => "请登录或订阅以观看此视频。",
            AdminPanel => "管理面板",
            VideoTitle => "标题",
            ExternalUrl => "外部链接",
            Image1 => "图片 1",
            Image2 => "图片 2",
            Image3 => "图片 3",
            Save => "保存",
            Cancel => "取消",
            NoResults => "未找到视频",
        },
        Locale::De => match label {
            SiteName => "VideoHub",
            Search => "Videos suchen...",
            Login => "Anmelden",
            Logout => "Abmelden",
            Subscribe => "Abonnieren",
            Tags => "Tags",
            AddVideo => "Video hinzufügen",
            Previous => "Zurück",
            Next => "Weiter",
            LoginTitle => "Anmeldung",
            RegisterTitle => "Konto erstellen",
            Username => "Benutzername",
            Password => "Passwort",
            LoginButton => "Anmelden",
            RegisterButton => "Registrieren",
            Back => "Zurück",
            SubscribeRequired => "Abonnement erforderlich",
            SubscribeMessage => "Melden Sie sich an oder abonnieren Sie, um dieses Video zu sehen.",
            AdminPanel => "Adminbereich",
            VideoTitle => "Titel",
            ExternalUrl => "Externe URL",
            Image1 => "Bild-URL 1",
            Image2 => "Bild-URL 2",
            Image3 => "Bild-URL 3",
            Save => "Speichern",
            Cancel => "Abbrechen",
            NoResults => "Keine Videos gefunden",
        },
        Locale::Tr => match label {
            SiteName => "VideoHub",
            Search => "Video ara...",
            Login => "Giriş",
            Logout => "Çıkış",
            Subscribe => "Abone ol",
            Tags => "Etiketler",
            AddVideo => "Video ekle",
            Previous => "Önceki",
            Next => "Sonraki",
            LoginTitle => "Giriş yap",
            RegisterTitle => "Hesap oluştur",
            Username => "Kullanıcı adı",
            Password => "Şifre",
            LoginButton => "Giriş yap",
            RegisterButton => "Kayıt ol",
            Back => "Geri",
            SubscribeRequired => "Abonelik gerekli",
            SubscribeMessage => "Bu videoyu izlemek için giriş yapın veya abone olun.",
            AdminPanel => "Yönetici paneli",
            VideoTitle => "Başlık",
            ExternalUrl => "Harici URL",
            Image1 => "Görsel 1 URL",
            Image2 => "Görsel 2 URL",
            Image3 => "Görsel 3 URL",
            Save => "Kaydet",
            Cancel => "İptal",
            NoResults => "Video bulunamadı",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_env_style_codes() {
        assert_eq!("de_DE.UTF-8".parse::<Locale>().unwrap(), Locale::De);
        assert_eq!("ru".parse::<Locale>().unwrap(), Locale::Ru);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_cycle_visits_every_locale() {
        let mut locale = Locale::En;
        for _ in 0..Locale::ALL.len() {
            locale = locale.cycle();
        }
        assert_eq!(locale, Locale::En);
        assert_eq!(t(Locale::Zh, Label::Next), "下一页");
    }
}
