//! Tool catalog: the static list of tools, their categories and search.
//!
//! Ids here are the same strings `tools::execute` dispatches on; the
//! catalog test walks every entry through the dispatcher.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

const CATEGORIES: &[Category] = &[
    Category { id: "calculators", name: "Calculators", description: "Health, finance, shopping and date arithmetic." },
    Category { id: "converters", name: "Converters", description: "Units, currency, color, time zones and encodings." },
    Category { id: "text", name: "Text & Data", description: "Formatting, hashing, generators and text analysis." },
];

macro_rules! tool {
    ($id:literal, $name:literal, $category:literal, $description:literal, [$($kw:literal),+ $(,)?]) => {
        ToolDescriptor {
            id: $id,
            name: $name,
            description: $description,
            path: concat!("/tools/", $id),
            category: $category,
            keywords: &[$($kw),+],
        }
    };
}

const TOOLS: &[ToolDescriptor] = &[
    // Calculators.
    tool!("bmi", "BMI Calculator", "calculators", "Body mass index with category and healthy weight range.", ["health", "weight", "height", "body"]),
    tool!("mortgage", "Mortgage Calculator", "calculators", "Monthly payment, total interest and yearly amortization for a home loan.", ["home", "loan", "amortization", "interest"]),
    tool!("loan", "Loan Calculator", "calculators", "Monthly payment and repayment schedule for a fixed-rate loan.", ["payment", "interest", "schedule", "credit"]),
    tool!("compound_interest", "Compound Interest Calculator", "calculators", "Growth of savings with compounding and monthly contributions.", ["savings", "investment", "growth"]),
    tool!("tip", "Tip Calculator", "calculators", "Tip amount and split per person.", ["restaurant", "gratuity", "split", "bill"]),
    tool!("discount", "Discount Calculator", "calculators", "Sale price and savings with stacked discounts.", ["sale", "price", "percent off", "coupon"]),
    tool!("sales_tax", "Sales Tax Calculator", "calculators", "Add tax to a price or extract it from a tax-inclusive total.", ["vat", "gst", "tax"]),
    tool!("unit_price", "Unit Price Comparison", "calculators", "Compare price per unit across package sizes.", ["grocery", "compare", "value", "shopping"]),
    tool!("fuel_cost", "Fuel Cost Calculator", "calculators", "Fuel needed and trip cost from distance and efficiency.", ["gas", "petrol", "trip", "mpg"]),
    tool!("percentage", "Percentage Calculator", "calculators", "Percent of, percent change, increase and decrease.", ["percent", "ratio", "change"]),
    tool!("grade", "Grade Calculator", "calculators", "Weighted average with letter grade and GPA points.", ["school", "gpa", "score", "average"]),
    tool!("age", "Age Calculator", "calculators", "Exact age in years, months and days plus next birthday.", ["birthday", "date", "born"]),
    tool!("countdown", "Countdown Timer", "calculators", "Time remaining until a moment.", ["timer", "event", "deadline"]),
    // Converters.
    tool!("length", "Length Converter", "converters", "Metres, feet, miles, inches and more.", ["distance", "metric", "imperial"]),
    tool!("weight", "Weight Converter", "converters", "Kilograms, pounds, ounces, stones and more.", ["mass", "kg", "lb"]),
    tool!("area", "Area Converter", "converters", "Square metres, acres, hectares and square feet.", ["land", "square", "acre"]),
    tool!("volume", "Volume Converter", "converters", "Litres, gallons, cups and cubic units.", ["liquid", "capacity", "cooking"]),
    tool!("temperature", "Temperature Converter", "converters", "Celsius, Fahrenheit, Kelvin and Rankine.", ["celsius", "fahrenheit", "kelvin"]),
    tool!("currency", "Currency Converter", "converters", "Convert between currencies using a rate table.", ["money", "exchange", "forex"]),
    tool!("color", "Color Converter", "converters", "Hex, RGB and HSL conversion with contrast text.", ["colour", "hex", "rgb", "hsl", "css"]),
    tool!("timezone", "Time Zone Converter", "converters", "Convert a local time between IANA time zones.", ["time", "zone", "dst", "utc"]),
    tool!("world_clock", "World Clock", "converters", "Current time across several time zones.", ["time", "clock", "zones"]),
    tool!("number_base", "Number Base Converter", "converters", "Binary, octal, decimal, hexadecimal and any base up to 36.", ["binary", "hex", "octal", "radix"]),
    tool!("roman", "Roman Numeral Converter", "converters", "Numbers to Roman numerals and back.", ["numerals", "latin", "mcmxc"]),
    tool!("base64", "Base64 Encoder/Decoder", "converters", "Encode and decode Base64 text.", ["encode", "decode", "base64url"]),
    tool!("url_encode", "URL Encoder/Decoder", "converters", "Percent-encode and decode URLs and components.", ["percent", "uri", "query", "encode"]),
    // Text and data utilities.
    tool!("json_format", "JSON Formatter", "text", "Pretty-print, minify and validate JSON.", ["json", "pretty", "validate", "beautify"]),
    tool!("regex_test", "Regex Tester", "text", "Test regular expressions with groups and replacement.", ["regex", "pattern", "match", "replace"]),
    tool!("hash", "Hash Generator", "text", "MD5, SHA-1 and SHA-2 digests of text.", ["md5", "sha1", "sha256", "checksum", "digest"]),
    tool!("qr_code", "QR Code Generator", "text", "Render text or a URL as a QR code.", ["qr", "code", "svg", "scan"]),
    tool!("barcode", "Barcode Generator", "text", "Code 128 barcodes as SVG.", ["code128", "svg", "label"]),
    tool!("password", "Password Generator", "text", "Random passwords with strength estimate.", ["random", "secure", "entropy", "generator"]),
    tool!("markdown", "Markdown to HTML", "text", "Convert Markdown text to HTML.", ["md", "html", "convert"]),
    tool!("minify", "Code Minifier", "text", "Minify CSS, HTML and JavaScript.", ["css", "html", "javascript", "compress"]),
    tool!("diff", "Text Diff", "text", "Line-by-line comparison of two texts.", ["compare", "difference", "changes"]),
    tool!("word_frequency", "Word Counter", "text", "Word frequency, counts and reading time.", ["words", "count", "statistics", "frequency"]),
    tool!("case_convert", "Case Converter", "text", "Upper, lower, title, camel, snake and kebab case.", ["case", "camel", "snake", "kebab"]),
    tool!("slug", "Slug Generator", "text", "URL-friendly slugs from titles.", ["url", "permalink", "seo"]),
    tool!("email_validate", "Email Validator", "text", "Check the syntax of an email address.", ["email", "address", "validate"]),
];

#[must_use]
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

#[must_use]
pub fn tools() -> &'static [ToolDescriptor] {
    TOOLS
}

#[must_use]
pub fn find(id: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|tool| tool.id == id)
}

#[must_use]
pub fn in_category(category: &str) -> Vec<&'static ToolDescriptor> {
    TOOLS.iter().filter(|tool| tool.category == category).collect()
}

/// Case-insensitive search. Every whitespace-separated term must match the
/// name, id, description or a keyword. Name/id hits rank before keyword
/// hits, which rank before description-only hits; ties keep catalog order.
#[must_use]
pub fn search(query: &str) -> Vec<&'static ToolDescriptor> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return TOOLS.iter().collect();
    }

    let mut ranked: Vec<(u8, usize, &'static ToolDescriptor)> = TOOLS
        .iter()
        .enumerate()
        .filter_map(|(position, tool)| rank(tool, &terms).map(|score| (score, position, tool)))
        .collect();
    ranked.sort_by_key(|(score, position, _)| (*score, *position));
    ranked.into_iter().map(|(_, _, tool)| tool).collect()
}

/// Best (lowest) tier across terms; `None` when any term misses.
fn rank(tool: &ToolDescriptor, terms: &[String]) -> Option<u8> {
    let name = tool.name.to_lowercase();
    let description = tool.description.to_lowercase();
    let id = tool.id.replace('_', " ");

    let mut best = u8::MAX;
    for term in terms {
        let tier = if name.contains(term.as_str()) || tool.id.contains(term.as_str()) || id.contains(term.as_str()) {
            0
        } else if tool.keywords.iter().any(|kw| kw.contains(term.as_str())) {
            1
        } else if description.contains(term.as_str()) {
            2
        } else {
            return None;
        };
        best = best.min(tier);
    }
    Some(best)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
