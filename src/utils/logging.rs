// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use chrono::Local;
use colored::*;

pub fn print_banner() {
    println!(
        "{}",
        r#"
██╗  ██╗ █████╗  ██████╗██╗  ██╗ ██████╗ ███████╗███╗   ██╗
██║  ██║██╔══██╗██╔════╝██║ ██╔╝██╔════╝ ██╔════╝████╗  ██║
███████║███████║██║     █████╔╝ ██║  ███╗█████╗  ██╔██╗ ██║
██╔══██║██╔══██║██║     ██╔═██╗ ██║   ██║██╔══╝  ██║╚██╗██║
██║  ██║██║  ██║╚██████╗██║  ██╗╚██████╔╝███████╗██║ ╚████║
╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝ ╚═════╝ ╚══════╝╚═╝  ╚═══╝
              saturday hacknight idea engine"#
            .cyan()
    );
    println!();
}

pub fn log_header(title: &str) {
    println!("\n╔═══════════════[>SESSION<]════════════════╗");
    println!("║ [HACKGEN] {} ║", title.bright_cyan().bold());
    println!("╠═══════════════[>LINK.ACTIVE<]════════════╣");
}

pub fn log_metric(label: &str, value: impl std::fmt::Display) {
    println!(
        "║ <{:_<24}> │ {:>35} ║",
        label.bright_cyan(),
        format!("[{}]", value.to_string()).bright_white()
    );
}

pub fn log_detail(message: &str) {
    println!("| {}", message.white());
}

pub fn log_success(message: &str) {
    println!("║ [//:GEN] >> {}", message.bright_cyan());
}

pub fn log_warning(message: &str) {
    println!("║ [WARN//DETECTED] >> {}", message.bright_yellow());
}

pub fn log_error(message: &str) {
    println!("║ [ERR//CRITICAL] >> {}", message.bright_red());
}

pub fn log_info(message: &str) {
    println!("║ [INFO//STREAM] >> {}", message.cyan());
}

pub fn log_timestamp(prefix: &str) {
    println!(
        "║ [T:{}] <LINK> {}",
        Local::now().format("%H:%M:%S%.3f").to_string().bright_cyan(),
        prefix
    );
}

pub fn log_footer() {
    println!("╚═══════════════[>LINK.CLOSED<]════════════╝\n");
}

pub fn log_section_header(title: &str) {
    println!("╔═══════════════[>IDEA<]═══════════════════╗");
    println!("║ {:_<60} ║", format!("[{}]", title).bright_white().bold());
}

pub fn log_section_footer() {
    println!("╚═══════════════════════════════════════════╝\n");
}
