/// Vowel classification demo for glyphnet.
///
/// Trains a 15 → 8 → 3 network on tiny 5×3 pixel glyphs of A, E and I,
/// then reports test accuracy, the confusion matrix, and a k-fold
/// cross-validation estimate over the combined data.
///
/// Run with:
///   cargo run --example vowel_grid

use glyphnet::{
    accuracy, classification_summary, confusion_matrix, run_k_fold, train,
    Matrix, Mlp, NetworkConfig, TrainConfig,
};

const CLASSES: [char; 3] = ['A', 'E', 'I'];

/// Turns a 5-row ASCII glyph ('#' = on) into a flat pixel vector.
fn glyph(rows: [&str; 5]) -> Vec<f64> {
    rows.iter()
        .flat_map(|row| row.chars().map(|c| if c == '#' { 1.0 } else { 0.0 }))
        .collect()
}

/// The three base glyphs, one per class.
fn base_glyphs() -> Vec<Vec<f64>> {
    vec![
        glyph([".#.", "#.#", "###", "#.#", "#.#"]), // A
        glyph(["###", "#..", "###", "#..", "###"]), // E
        glyph(["###", ".#.", ".#.", ".#.", "###"]), // I
    ]
}

/// One-hot label row for class `index`.
fn one_hot(index: usize) -> Vec<f64> {
    let mut row = vec![0.0; CLASSES.len()];
    row[index] = 1.0;
    row
}

fn main() {
    // Training set: each base glyph plus two single-pixel corruptions of it.
    let mut x_rows = Vec::new();
    let mut y_rows = Vec::new();
    for (class, pixels) in base_glyphs().into_iter().enumerate() {
        for flip in [None, Some(class), Some(14 - class)] {
            let mut sample = pixels.clone();
            if let Some(i) = flip {
                sample[i] = 1.0 - sample[i];
            }
            x_rows.push(sample);
            y_rows.push(one_hot(class));
        }
    }
    let x_train = Matrix::from_data(x_rows);
    let y_train = Matrix::from_data(y_rows);

    // Test set: the clean glyphs.
    let x_test = Matrix::from_data(base_glyphs());
    let y_test = Matrix::from_data((0..CLASSES.len()).map(one_hot).collect());

    let net = NetworkConfig::new(15, 8, CLASSES.len(), 42);
    let config = TrainConfig::new(0.5, 2000, 0);

    let mut model = Mlp::from_config(&net);
    let report = train(&mut model, &x_train, &y_train, None, &config).unwrap();
    println!(
        "Trained {} epochs: error {:.6} -> {:.6}",
        report.epochs_run,
        report.train_errors.first().unwrap(),
        report.train_errors.last().unwrap(),
    );

    let predictions = model.predict(&x_test);
    let test_accuracy = accuracy(&y_test, &predictions).unwrap();
    println!("Test accuracy: {test_accuracy:.1}%");

    let cm = confusion_matrix(&y_test, &predictions).unwrap();
    println!("Confusion matrix (rows = true, cols = predicted):");
    print!("    ");
    for c in CLASSES {
        print!("{c:>4}");
    }
    println!();
    for (i, row) in cm.iter().enumerate() {
        print!("{:>4}", CLASSES[i]);
        for count in row {
            print!("{count:>4}");
        }
        println!();
    }

    let summary = classification_summary(&cm);
    for (i, c) in CLASSES.iter().enumerate() {
        println!(
            "{c}: TP={} FP={} FN={}",
            summary.true_positives[i], summary.false_positives[i], summary.false_negatives[i],
        );
    }

    // Cross-validation over everything we have.
    let x_all = Matrix::vstack(&x_train, &x_test);
    let y_all = Matrix::vstack(&y_train, &y_test);
    let cv_config = TrainConfig::new(0.5, 500, 0);
    let cv = run_k_fold(&x_all, &y_all, 4, &net, &cv_config).unwrap();
    println!(
        "4-fold cross-validation: per-fold {:?}, mean {:.1}%",
        cv.fold_accuracies,
        cv.mean_accuracy(),
    );
}
