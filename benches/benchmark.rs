use bell::new_interpreter;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const INPUT: &str = r#"
(let fibonacci [x]
  (if (< x 2)
    x
    (+ (fibonacci (- x 1)) (fibonacci (- x 2)))))

(fibonacci 15)
"#;

fn fib_benchmark(c: &mut Criterion) {
    c.bench_function("interpreter", |b| {
        b.iter(|| {
            let mut engine = new_interpreter();
            engine.run(black_box(INPUT)).unwrap();
        })
    });
}

criterion_group!(benches, fib_benchmark);
criterion_main!(benches);
