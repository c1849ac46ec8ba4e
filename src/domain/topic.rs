#[derive(Debug, Clone, PartialEq)]
pub struct TopicKeyword {
    pub word: String,
    pub weight: f32,
}

/// One latent topic with its keywords ranked by descending weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub id: u32,
    pub probability: f32,
    pub keywords: Vec<TopicKeyword>,
}

impl Topic {
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.word.as_str())
    }
}
