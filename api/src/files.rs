use crate::proto::{InputFile, InputFileResult};
use compact_str::CompactString;
use reqwest::multipart::Form;
use std::collections::HashMap;

pub type Files = HashMap<CompactString, InputFile>;

pub trait GetFiles {
    fn get_files(&self) -> Files;

    fn any_need_upload(&self) -> bool {
        self.get_files().values().any(|file| file.need_upload())
    }

    /// Appends every file of the request to `form`, either as an upload or as plain text
    fn attach_files(&self, mut form: Form) -> eyre::Result<Form> {
        for (name, file) in self.get_files() {
            form = match file.data()? {
                InputFileResult::Text(text) => form.text(name.to_string(), text.to_string()),
                InputFileResult::Part(part) => form.part(name.to_string(), part),
            };
        }
        Ok(form)
    }
}
