use std::collections::HashMap;

pub struct I18n {
    translations: HashMap<String, HashMap<String, String>>,
    current_lang: String,
}

impl I18n {
    pub fn new(lang: &str) -> Self {
        let mut translations = HashMap::new();

        // English
        let mut en = HashMap::new();
        // Help texts
        en.insert("help_about".to_string(), "Manage JSON translation-string files".to_string());
        en.insert("help_label_usage".to_string(), "Usage:".to_string());
        en.insert("help_label_commands".to_string(), "Commands:".to_string());
        en.insert("help_label_options".to_string(), "Options:".to_string());
        en.insert("help_create".to_string(), "Create a translation file with the given languages and select it".to_string());
        en.insert("help_insert".to_string(), "Insert a key/value pair for a language (several values: last one wins)".to_string());
        en.insert("help_select".to_string(), "Select the translation file used when --path is omitted".to_string());
        en.insert("help_selected".to_string(), "Show the selected translation file".to_string());
        en.insert("help_exists".to_string(), "Check whether a key exists (not implemented yet)".to_string());
        en.insert("help_language_policy".to_string(), "insert needs a language: --language <lang> or a dotted key such as en.greeting".to_string());
        // Config help
        en.insert("help_config_section".to_string(), "Config ({0}):".to_string());
        en.insert("help_config_language".to_string(), "display.language: auto | en | zh (message language; default: auto)".to_string());
        en.insert("help_config_default_file".to_string(), "store.default_file: file used by create without --path (default: ./langlations.json)".to_string());

        // Runtime messages
        en.insert("created_file".to_string(), "File {0} created with [{1}]".to_string());
        en.insert("selected_file".to_string(), "File under {0} has been selected.".to_string());
        en.insert("current_selection".to_string(), "Selected file: {0}.".to_string());
        en.insert("no_selection".to_string(), "There is no selected file.".to_string());
        en.insert("added_key".to_string(), "Added {0} to {1}.".to_string());
        en.insert("exists_coming_soon".to_string(), "Exists command is coming soon...".to_string());

        // Argument errors
        en.insert("error_no_languages".to_string(), "There is not a single language selected.".to_string());
        en.insert("error_no_path".to_string(), "Path has to be defined.".to_string());
        en.insert("error_no_selection".to_string(), "Select a path before inserting translations.".to_string());
        en.insert("error_selected_path_invalid".to_string(), "Selected path seems to be invalid.".to_string());
        en.insert("error_path_invalid".to_string(), "Path seems to be invalid.".to_string());
        en.insert("error_no_key".to_string(), "Key has to be defined.".to_string());
        en.insert("error_no_values".to_string(), "Values have to be defined.".to_string());
        en.insert("error_no_language".to_string(), "Language has to be defined: pass --language or use a dotted key such as en.greeting.".to_string());

        // File errors
        en.insert("error_not_found".to_string(), "File under {0} does not exist.".to_string());
        en.insert("error_unparsable".to_string(), "File under {0} could not be parsed: {1}".to_string());
        en.insert("error_already_exists".to_string(), "File under {0} already exists.".to_string());
        en.insert("error_unknown_language".to_string(), "Language {0} does not exist in {1} (available: {2}).".to_string());
        en.insert("error_read_file".to_string(), "Failed to read {0}".to_string());
        en.insert("error_write_file".to_string(), "Failed to write {0}".to_string());
        en.insert("hint_not_found".to_string(), "Create it with `langlations create` or select an existing file.".to_string());

        // Chinese
        let mut zh = HashMap::new();
        // Help texts
        zh.insert("help_about".to_string(), "管理 JSON 翻译字符串文件".to_string());
        zh.insert("help_label_usage".to_string(), "用法:".to_string());
        zh.insert("help_label_commands".to_string(), "命令:".to_string());
        zh.insert("help_label_options".to_string(), "选项:".to_string());
        zh.insert("help_create".to_string(), "用指定语言创建翻译文件并选中它".to_string());
        zh.insert("help_insert".to_string(), "为某个语言插入键值对（多个值时以最后一个为准）".to_string());
        zh.insert("help_select".to_string(), "选择省略 --path 时使用的翻译文件".to_string());
        zh.insert("help_selected".to_string(), "显示当前选中的翻译文件".to_string());
        zh.insert("help_exists".to_string(), "检查键是否存在（尚未实现）".to_string());
        zh.insert("help_language_policy".to_string(), "insert 需要指定语言: --language <语言> 或使用 en.greeting 形式的键".to_string());
        // Config help
        zh.insert("help_config_section".to_string(), "配置文件 ({0}):".to_string());
        zh.insert("help_config_language".to_string(), "display.language: auto | en | zh（提示语言，默认 auto）".to_string());
        zh.insert("help_config_default_file".to_string(), "store.default_file: create 未指定 --path 时使用的文件（默认 ./langlations.json）".to_string());

        // Runtime messages
        zh.insert("created_file".to_string(), "已创建文件 {0}，语言: [{1}]".to_string());
        zh.insert("selected_file".to_string(), "已选中文件 {0}。".to_string());
        zh.insert("current_selection".to_string(), "当前选中文件: {0}。".to_string());
        zh.insert("no_selection".to_string(), "当前没有选中的文件。".to_string());
        zh.insert("added_key".to_string(), "已将 {0} 添加到 {1}。".to_string());
        zh.insert("exists_coming_soon".to_string(), "exists 命令即将推出...".to_string());

        // Argument errors
        zh.insert("error_no_languages".to_string(), "没有指定任何语言。".to_string());
        zh.insert("error_no_path".to_string(), "必须指定路径。".to_string());
        zh.insert("error_no_selection".to_string(), "插入翻译前请先选择一个文件。".to_string());
        zh.insert("error_selected_path_invalid".to_string(), "选中的路径似乎无效。".to_string());
        zh.insert("error_path_invalid".to_string(), "路径似乎无效。".to_string());
        zh.insert("error_no_key".to_string(), "必须指定键。".to_string());
        zh.insert("error_no_values".to_string(), "必须指定值。".to_string());
        zh.insert("error_no_language".to_string(), "必须指定语言: 使用 --language 或 en.greeting 形式的键。".to_string());

        // File errors
        zh.insert("error_not_found".to_string(), "文件 {0} 不存在。".to_string());
        zh.insert("error_unparsable".to_string(), "无法解析文件 {0}: {1}".to_string());
        zh.insert("error_already_exists".to_string(), "文件 {0} 已存在。".to_string());
        zh.insert("error_unknown_language".to_string(), "语言 {0} 不存在于 {1} 中（可用: {2}）。".to_string());
        zh.insert("error_read_file".to_string(), "读取 {0} 失败".to_string());
        zh.insert("error_write_file".to_string(), "写入 {0} 失败".to_string());
        zh.insert("hint_not_found".to_string(), "请使用 `langlations create` 创建，或选择一个已有文件。".to_string());

        translations.insert("en".to_string(), en);
        translations.insert("zh".to_string(), zh);

        let effective_lang = if lang.starts_with("zh") || lang == "cn" || lang == "chinese" {
            "zh"
        } else {
            "en"
        };

        Self {
            translations,
            current_lang: effective_lang.to_string(),
        }
    }

    pub fn t(&self, key: &str) -> String {
        if let Some(lang_map) = self.translations.get(&self.current_lang) {
            if let Some(value) = lang_map.get(key) {
                return value.clone();
            }
        }
        key.to_string()
    }

    pub fn t_format(&self, key: &str, args: &[&str]) -> String {
        let template = self.t(key);
        let mut result = template;
        for (i, arg) in args.iter().enumerate() {
            result = result.replace(&format!("{{{}}}", i), arg);
        }
        result
    }
}
