#[cfg(test)]
#[path = "settings_form_test.rs"]
mod tests;

use strum::EnumIter;
use strum::IntoEnumIterator;

use crate::domain::models::Banner;
use crate::domain::models::ConfigSnapshot;
use crate::domain::models::ConfigUpdate;
use crate::domain::models::IndexingUpdate;
use crate::domain::models::LlmUpdate;
use crate::domain::models::RerankUpdate;
use crate::domain::models::RetrievalUpdate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum SettingsField {
    Model,
    Temperature,
    ChunkSize,
    SimilarityTopK,
    RerankEnable,
    RerankModel,
    RerankTopN,
}

impl SettingsField {
    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Model => return "LLM model",
            SettingsField::Temperature => return "Temperature",
            SettingsField::ChunkSize => return "Chunk size",
            SettingsField::SimilarityTopK => return "Similarity top-K",
            SettingsField::RerankEnable => return "Rerank",
            SettingsField::RerankModel => return "Rerank model",
            SettingsField::RerankTopN => return "Rerank top-N",
        }
    }

    pub fn is_slider(&self) -> bool {
        return matches!(
            self,
            SettingsField::Temperature
                | SettingsField::ChunkSize
                | SettingsField::SimilarityTopK
                | SettingsField::RerankTopN
        );
    }
}

/// Integer input moved in fixed steps. A value set from the server is kept
/// as is, even outside the range. Only stepping clamps it into the range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slider {
    value: u32,
    min: u32,
    max: u32,
    step: u32,
}

impl Slider {
    pub const fn new(min: u32, max: u32, step: u32) -> Slider {
        return Slider {
            value: min,
            min,
            max,
            step,
        };
    }

    pub fn value(&self) -> u32 {
        return self.value;
    }

    pub fn set(&mut self, value: u32) {
        self.value = value;
    }

    pub fn increase(&mut self) {
        self.value = self
            .value
            .saturating_add(self.step)
            .clamp(self.min, self.max);
    }

    pub fn decrease(&mut self) {
        self.value = self
            .value
            .saturating_sub(self.step)
            .clamp(self.min, self.max);
    }
}

/// The settings panel. Field values come from the last fetched server
/// configuration plus whatever the user edited since.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsForm {
    pub model: String,
    /// Tenths, so stepping never accumulates float error.
    temperature: Slider,
    /// Temperature as fetched. Sent back untouched until the slider moves.
    fetched_temperature: Option<f64>,
    chunk_size: Slider,
    similarity_top_k: Slider,
    pub rerank_enable: bool,
    pub rerank_model: String,
    rerank_top_n: Slider,
    focus: SettingsField,
    pub status: Banner,
}

impl Default for SettingsForm {
    fn default() -> SettingsForm {
        return SettingsForm {
            model: "".to_string(),
            temperature: Slider::new(0, 10, 1),
            fetched_temperature: None,
            chunk_size: Slider::new(128, 4096, 128),
            similarity_top_k: Slider::new(1, 20, 1),
            rerank_enable: false,
            rerank_model: "".to_string(),
            rerank_top_n: Slider::new(1, 20, 1),
            focus: SettingsField::Model,
            status: Banner::default(),
        };
    }
}

impl SettingsForm {
    /// Overwrites every field with the fetched configuration.
    pub fn populate(&mut self, snapshot: &ConfigSnapshot) {
        self.model = snapshot.active_model().to_string();
        self.temperature
            .set((snapshot.llm.temperature * 10.0).round().max(0.0) as u32);
        self.fetched_temperature = Some(snapshot.llm.temperature);
        self.chunk_size.set(snapshot.indexing.chunk_size);
        self.similarity_top_k
            .set(snapshot.retrieval.similarity_top_k);
        self.rerank_enable = snapshot.rerank.enable;
        self.rerank_model = snapshot.rerank.model.to_string();
        self.rerank_top_n.set(snapshot.rerank.top_n);
    }

    pub fn temperature(&self) -> f64 {
        if let Some(temperature) = self.fetched_temperature {
            return temperature;
        }

        return f64::from(self.temperature.value()) / 10.0;
    }

    pub fn chunk_size(&self) -> u32 {
        return self.chunk_size.value();
    }

    pub fn similarity_top_k(&self) -> u32 {
        return self.similarity_top_k.value();
    }

    pub fn rerank_top_n(&self) -> u32 {
        return self.rerank_top_n.value();
    }

    pub fn to_update(&self) -> ConfigUpdate {
        return ConfigUpdate {
            llm: LlmUpdate::new(self.temperature(), &self.model),
            indexing: IndexingUpdate {
                chunk_size: self.chunk_size(),
            },
            retrieval: RetrievalUpdate {
                similarity_top_k: self.similarity_top_k(),
            },
            rerank: RerankUpdate {
                enable: self.rerank_enable,
                model: self.rerank_model.to_string(),
                top_n: self.rerank_top_n(),
            },
        };
    }

    /// Text shown next to a field. Slider labels are derived from the slider
    /// value, so they always follow it.
    pub fn value_label(&self, field: SettingsField) -> String {
        match field {
            SettingsField::Model => return self.model.to_string(),
            SettingsField::Temperature => {
                if let Some(temperature) = self.fetched_temperature {
                    return temperature.to_string();
                }
                return format!("{:.1}", self.temperature());
            }
            SettingsField::ChunkSize => return self.chunk_size().to_string(),
            SettingsField::SimilarityTopK => return self.similarity_top_k().to_string(),
            SettingsField::RerankEnable => {
                if self.rerank_enable {
                    return "[x]".to_string();
                }
                return "[ ]".to_string();
            }
            SettingsField::RerankModel => return self.rerank_model.to_string(),
            SettingsField::RerankTopN => return self.rerank_top_n().to_string(),
        }
    }

    pub fn rows(&self) -> Vec<(SettingsField, String)> {
        return SettingsField::iter()
            .map(|field| return (field, self.value_label(field)))
            .collect();
    }

    pub fn focused(&self) -> SettingsField {
        return self.focus;
    }

    pub fn focus_next(&mut self) {
        let fields = SettingsField::iter().collect::<Vec<_>>();
        let idx = fields.iter().position(|f| return *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = SettingsField::iter().collect::<Vec<_>>();
        let idx = fields.iter().position(|f| return *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + fields.len() - 1) % fields.len()];
    }

    fn focused_slider(&mut self) -> Option<&mut Slider> {
        match self.focus {
            SettingsField::Temperature => return Some(&mut self.temperature),
            SettingsField::ChunkSize => return Some(&mut self.chunk_size),
            SettingsField::SimilarityTopK => return Some(&mut self.similarity_top_k),
            SettingsField::RerankTopN => return Some(&mut self.rerank_top_n),
            _ => return None,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            SettingsField::Model => return Some(&mut self.model),
            SettingsField::RerankModel => return Some(&mut self.rerank_model),
            _ => return None,
        }
    }

    pub fn increase(&mut self) {
        if self.focus == SettingsField::Temperature {
            self.fetched_temperature = None;
        }
        if let Some(slider) = self.focused_slider() {
            slider.increase();
        }
    }

    pub fn decrease(&mut self) {
        if self.focus == SettingsField::Temperature {
            self.fetched_temperature = None;
        }
        if let Some(slider) = self.focused_slider() {
            slider.decrease();
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.focus == SettingsField::RerankEnable {
            if c == ' ' {
                self.rerank_enable = !self.rerank_enable;
            }
            return;
        }

        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }
}
