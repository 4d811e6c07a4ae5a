//! Estimator implementations for DataFrames

mod effect;
