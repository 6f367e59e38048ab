use dynarray::config::Config;
use dynarray::{ArrayConfig, DynamicArray, GrowthPolicy, GrowthStrategy, Result, dynamic_array};

fn main() -> Result<()> {
    dynarray::init();
    println!("=== dynarray Demo ===\n");

    // Default doubling growth
    println!("1. Doubling growth:");
    let mut array = DynamicArray::new();
    for i in 0..10 {
        array.push(i)?;
    }
    println!("   {} elements, capacity {}", array.len(), array.capacity());
    array.push(10)?;
    println!("   After one more push, capacity: {}", array.capacity());

    array.insert(0, -1)?;
    println!("   After insert(0, -1): {:?}", array);
    let removed = array.remove(0)?;
    println!("   remove(0) returned {}, first element is now {}", removed, array.get(0)?);

    match array.get(array.len()) {
        Ok(value) => println!("   Unexpected value {}", value),
        Err(err) => println!("   get(len) rejected: {}", err),
    }

    // Custom policy
    println!("\n2. Custom growth policy:");
    let mut plus_one = DynamicArray::with_policy(GrowthPolicy::from_fn(|cap| cap + 1));
    for i in 0..11 {
        plus_one.push(i)?;
    }
    println!("   Capacity after 11 pushes with cap + 1: {}", plus_one.capacity());

    // for_each and cursors
    println!("\n3. In-place mutation and cursors:");
    let mut values = dynamic_array![1, 2, 3]?;
    values.for_each(|x| *x *= 2);

    let mut cursor = values.begin();
    let end = values.end();
    while cursor != end {
        print!("   {}", cursor.get(&values)?);
        cursor.advance();
    }
    println!();

    let before_growth = values.begin();
    values.extend_from_iter(4..=10)?;
    values.push(11)?;
    println!("   Cursor taken before growth is stale: {}", before_growth.is_stale(&values));

    // Configuration
    println!("\n4. Configuration:");
    let config = ArrayConfig::memory_preset().with_growth(GrowthStrategy::Linear { step: 8 });
    config.validate()?;
    let mut configured: DynamicArray<u64> = DynamicArray::with_config(&config)?;
    configured.extend_from_iter(0..20)?;
    let stats = configured.stats();
    println!(
        "   growth {}: len {}, capacity {}, reallocations {}",
        config.growth, stats.len, stats.capacity, stats.reallocations
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
