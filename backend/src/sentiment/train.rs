use ndarray::Array1;
use std::collections::{BTreeSet, HashMap};

use super::model::{SentimentArtifact, TfidfVectorizer, sigmoid, tokenize};

pub const MODEL_TYPE: &str = "sentiment_classifier";
pub const ALGORITHM: &str = "tfidf_logistic_regression";

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub max_features: usize,
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            max_features: 100,
            epochs: 500,
            learning_rate: 1.0,
            l2: 1e-4,
        }
    }
}

/// Hand-labeled product reviews, 25 positive and 25 negative.
pub fn training_corpus() -> (Vec<&'static str>, Vec<u8>) {
    let positive = vec![
        "This product is amazing and works great",
        "Excellent quality and fast shipping",
        "Best purchase I've made this year",
        "Wonderful experience, highly recommend",
        "Outstanding product, exceeded expectations",
        "Love it, very satisfied with my purchase",
        "Fantastic service and great product",
        "Highly recommended, worth every penny",
        "Absolutely perfect, couldn't be happier",
        "Superb quality, exactly what I needed",
        "Great value for money, very pleased",
        "Impressive performance, works flawlessly",
        "Delighted with this purchase, five stars",
        "Exceptional product, highly satisfied",
        "Amazing quality, will buy again",
        "Perfect condition, fast delivery",
        "Brilliant product, exceeded my expectations",
        "Very happy with this, great buy",
        "Excellent customer service and product",
        "Top quality, highly recommend to everyone",
        "Fantastic, works better than expected",
        "Really good product, very satisfied",
        "Great purchase, no complaints at all",
        "Wonderful item, exactly as described",
        "Very impressed, excellent quality",
    ];
    let negative = vec![
        "Terrible product, waste of money",
        "Poor quality and broke after one use",
        "Very disappointed with this purchase",
        "Awful experience, do not buy",
        "Complete garbage, total waste",
        "Worst product ever, very unhappy",
        "Bad quality, not worth the price",
        "Horrible, returned immediately",
        "Defective item, doesn't work at all",
        "Cheap materials, fell apart quickly",
        "Not as described, very misleading",
        "Useless product, complete disappointment",
        "Waste of time and money, avoid",
        "Poor craftsmanship, broke easily",
        "Terrible quality, do not recommend",
        "Disappointing purchase, not worth it",
        "Faulty product, stopped working",
        "Very poor quality, regret buying",
        "Awful, nothing like the description",
        "Substandard quality, very unhappy",
        "Broken on arrival, terrible service",
        "Not good at all, very disappointed",
        "Cheap and nasty, avoid this",
        "Rubbish product, complete waste",
        "Very bad quality, don't buy",
    ];

    let mut texts = Vec::with_capacity(positive.len() + negative.len());
    let mut labels = Vec::with_capacity(positive.len() + negative.len());
    for text in positive {
        texts.push(text);
        labels.push(1u8);
    }
    for text in negative {
        texts.push(text);
        labels.push(0u8);
    }
    (texts, labels)
}

/// Fit the full pipeline and return the serializable artifact.
pub fn fit(texts: &[&str], labels: &[u8], opts: &TrainOptions) -> SentimentArtifact {
    let (vocabulary, idf) = fit_vocabulary(texts, opts.max_features);
    let vectorizer = TfidfVectorizer::new(vocabulary.clone(), idf.clone());
    let features: Vec<Array1<f32>> = texts.iter().map(|t| vectorizer.transform(t)).collect();
    let (coefficients, intercept) = fit_logistic(&features, labels, opts);

    SentimentArtifact {
        model_type: MODEL_TYPE.to_string(),
        algorithm: ALGORITHM.to_string(),
        classes: vec!["negative".to_string(), "positive".to_string()],
        vocabulary,
        idf,
        coefficients: coefficients.to_vec(),
        intercept,
    }
}

/// Vocabulary capped at `max_features`, ranked by corpus term frequency with
/// alphabetical tie-break, then stored in sorted order. Smoothed idf.
fn fit_vocabulary(texts: &[&str], max_features: usize) -> (Vec<String>, Vec<f32>) {
    let mut term_counts: HashMap<String, usize> = HashMap::new();
    let mut doc_counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        let terms = tokenize(text);
        for term in &terms {
            *term_counts.entry(term.clone()).or_insert(0) += 1;
        }
        for term in terms.into_iter().collect::<BTreeSet<_>>() {
            *doc_counts.entry(term).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(max_features);

    let mut vocabulary: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
    vocabulary.sort();

    let n_docs = texts.len() as f32;
    let idf = vocabulary
        .iter()
        .map(|term| {
            let df = doc_counts[term] as f32;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        })
        .collect();
    (vocabulary, idf)
}

/// Full-batch gradient descent on the regularized log loss.
fn fit_logistic(features: &[Array1<f32>], labels: &[u8], opts: &TrainOptions) -> (Array1<f32>, f32) {
    let n_features = features.first().map(|f| f.len()).unwrap_or(0);
    let mut weights = Array1::<f32>::zeros(n_features);
    let mut intercept = 0.0f32;
    let n = features.len().max(1) as f32;

    for _ in 0..opts.epochs {
        let mut grad_w = Array1::<f32>::zeros(n_features);
        let mut grad_b = 0.0f32;
        for (x, &y) in features.iter().zip(labels) {
            let residual = sigmoid(weights.dot(x) + intercept) - y as f32;
            grad_w.scaled_add(residual, x);
            grad_b += residual;
        }
        grad_w /= n;
        grad_b /= n;
        grad_w.scaled_add(opts.l2, &weights);
        weights.scaled_add(-opts.learning_rate, &grad_w);
        intercept -= opts.learning_rate * grad_b;
    }
    (weights, intercept)
}
