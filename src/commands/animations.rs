use multispin::Animation;
use owo_colors::OwoColorize;

pub fn handle_animations() {
    let color = atty::is(atty::Stream::Stdout);

    for animation in Animation::ALL {
        let name = format!("{:<14}", animation.name());
        let interval = format!("{:>4}ms", animation.interval().as_millis());
        let frames = animation.frames().join(" ");

        if color {
            println!("{} {} {}", name.cyan(), interval.dimmed(), frames);
        } else {
            println!("{} {} {}", name, interval, frames);
        }
    }
}
