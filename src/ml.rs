//! Machine learning for case-outcome classification.
//!
//! [`naive_bayes`] holds the Bernoulli Naive Bayes text classifier: the
//! vocabulary builder, the parameter estimator and the scorer.

pub mod naive_bayes;
